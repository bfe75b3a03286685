use tiff::decoder::DecodingResult;

/// decoded raster samples in their native type, row-major, with `stride`
/// interleaved bands per pixel. only the first band is read.
pub enum SampleStore {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl From<DecodingResult> for SampleStore {
    fn from(value: DecodingResult) -> Self {
        match value {
            DecodingResult::U8(v) => SampleStore::U8(v),
            DecodingResult::U16(v) => SampleStore::U16(v),
            DecodingResult::U32(v) => SampleStore::U32(v),
            DecodingResult::U64(v) => SampleStore::U64(v),
            DecodingResult::I8(v) => SampleStore::I8(v),
            DecodingResult::I16(v) => SampleStore::I16(v),
            DecodingResult::I32(v) => SampleStore::I32(v),
            DecodingResult::I64(v) => SampleStore::I64(v),
            DecodingResult::F32(v) => SampleStore::F32(v),
            DecodingResult::F64(v) => SampleStore::F64(v),
        }
    }
}

impl SampleStore {
    pub fn len(&self) -> usize {
        match self {
            SampleStore::U8(v) => v.len(),
            SampleStore::U16(v) => v.len(),
            SampleStore::U32(v) => v.len(),
            SampleStore::U64(v) => v.len(),
            SampleStore::I8(v) => v.len(),
            SampleStore::I16(v) => v.len(),
            SampleStore::I32(v) => v.len(),
            SampleStore::I64(v) => v.len(),
            SampleStore::F32(v) => v.len(),
            SampleStore::F64(v) => v.len(),
        }
    }

    /// the sample at a linear index, widened to f64
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            SampleStore::U8(v) => v.get(index).map(|s| *s as f64),
            SampleStore::U16(v) => v.get(index).map(|s| *s as f64),
            SampleStore::U32(v) => v.get(index).map(|s| *s as f64),
            SampleStore::U64(v) => v.get(index).map(|s| *s as f64),
            SampleStore::I8(v) => v.get(index).map(|s| *s as f64),
            SampleStore::I16(v) => v.get(index).map(|s| *s as f64),
            SampleStore::I32(v) => v.get(index).map(|s| *s as f64),
            SampleStore::I64(v) => v.get(index).map(|s| *s as f64),
            SampleStore::F32(v) => v.get(index).map(|s| *s as f64),
            SampleStore::F64(v) => v.get(index).cloned(),
        }
    }
}
