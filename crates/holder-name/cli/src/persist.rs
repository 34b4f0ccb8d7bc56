use std::path::PathBuf;

const HISTORY_FILENAME: &str = "history.txt";

pub(crate) struct CliPersistence {
    pub(crate) data_dir: PathBuf,
}

impl CliPersistence {
    pub(crate) fn history_file(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILENAME)
    }
}
