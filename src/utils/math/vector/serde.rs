use num::Float;
use ::serde::ser::SerializeStruct;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SparseVec;

impl<N> Serialize for SparseVec<N>
where
    N: Float + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // nnz and entries, entries as an ordered (term, value) list
        let mut state = serializer.serialize_struct("SparseVec", 2)?;
        state.serialize_field("nnz", &(self.entries.len() as u64))?;
        state.serialize_field("entries", &self.entries)?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SparseVec<N>
where
    N: Float + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SparseVecData<N> {
            #[allow(dead_code)]
            nnz: u64,
            entries: Vec<(String, N)>,
        }

        let data = SparseVecData::<N>::deserialize(deserializer)?;
        // rebuild through from_entries so order and uniqueness hold again
        Ok(SparseVec::from_entries(data.entries))
    }
}
