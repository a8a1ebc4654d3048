use crate::constants::MIB;

/// New file row to insert into database
#[derive(Debug, Clone)]
pub struct NewFile {
    pub filename: String,
    pub mime_type: Option<String>,
    pub content: Vec<u8>,
}

/// File upload configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 16 * MIB, // 16MB
        }
    }
}
