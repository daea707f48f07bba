mod data;

use std::{path::PathBuf, sync::Arc};

use app_core::backend::BackendState;

pub use data::Record;

#[cfg(test)]
pub(crate) use data::tests::record;

/// State owned by the backend thread: where the dataset lives.
pub struct BackendAppState {
    data_path: PathBuf,
}

impl BackendState for BackendAppState {}

impl BackendAppState {
    pub fn new(data_path: PathBuf) -> Self {
        Self { data_path }
    }

    pub fn load_records(&self) -> Result<Arc<[Record]>, String> {
        log::info!("loading dataset from {:?}", self.data_path);
        Record::from_path(&self.data_path).map(Arc::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_records() {
        let dataset = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../assets/data/data.csv");
        let records = BackendAppState::new(dataset).load_records().unwrap();
        assert_eq!(records.len(), 12);

        let missing = BackendAppState::new(PathBuf::from("/nonexistent/census.csv"));
        assert!(missing.load_records().is_err());
    }
}
