use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MascotList {
    pub success: bool,
    pub mascots: Vec<String>,
}

/// A resolved media file ready to be sent.
#[derive(Debug)]
pub struct MascotMedia {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}
