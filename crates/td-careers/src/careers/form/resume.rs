use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use tracing::debug;

use crate::careers::notice::Notice;

pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

pub const FILE_TOO_LARGE: Notice =
    Notice::destructive("File too large", "Maximum file size is 10MB");

/// How the file reached the form. Both paths apply the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    FilePicker,
    DragAndDrop,
}

/// Selection refused before it reaches the form state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileRejected {
    #[error("{file_name} is {size} bytes, above the 10MB limit")]
    TooLarge { file_name: String, size: u64 },
    #[error("{file_name} is not a PDF, DOC or DOCX file")]
    UnsupportedType { file_name: String },
    #[error("could not read {file_name}: {reason}")]
    Unreadable { file_name: String, reason: String },
}

impl FileRejected {
    pub fn notice(&self) -> Notice {
        match self {
            FileRejected::TooLarge { .. } => FILE_TOO_LARGE,
            FileRejected::UnsupportedType { .. } => Notice::destructive(
                "Invalid file type",
                "Please upload PDF, DOC, or DOCX files only",
            ),
            FileRejected::Unreadable { .. } => {
                Notice::destructive("Upload failed", "The selected file could not be read")
            }
        }
    }
}

/// Accepted resume held by the full-time form.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    file_name: String,
    content: Vec<u8>,
}

impl std::fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("size", &self.content.len())
            .finish()
    }
}

impl ResumeFile {
    /// Apply the size and extension rules to an in-memory selection.
    pub fn select(
        file_name: impl Into<String>,
        content: Vec<u8>,
        source: SelectionSource,
    ) -> Result<Self, FileRejected> {
        let file_name = file_name.into();
        check_selection(&file_name, content.len() as u64)?;
        debug!(?source, file = %file_name, size = content.len(), "resume selected");
        Ok(Self { file_name, content })
    }

    /// Read a resume from disk. The size is checked from metadata first so
    /// oversized files are never loaded.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, FileRejected> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let unreadable = |err: std::io::Error| FileRejected::Unreadable {
            file_name: file_name.clone(),
            reason: err.to_string(),
        };

        let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
        check_selection(&file_name, metadata.len())?;
        let content = tokio::fs::read(path).await.map_err(unreadable)?;
        Self::select(file_name, content, SelectionSource::FilePicker)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn mime_type(&self) -> mime::Mime {
        mime_guess::from_path(&self.file_name).first_or_octet_stream()
    }

    /// `data:<mime>;base64,<content>`, the form the webhook expects.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type().essence_str(),
            BASE64.encode(&self.content)
        )
    }
}

fn check_selection(file_name: &str, size: u64) -> Result<(), FileRejected> {
    if size > MAX_RESUME_BYTES {
        return Err(FileRejected::TooLarge {
            file_name: file_name.to_string(),
            size,
        });
    }
    if !has_allowed_extension(file_name) {
        return Err(FileRejected::UnsupportedType {
            file_name: file_name.to_string(),
        });
    }
    Ok(())
}

fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, extension)| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| extension.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
