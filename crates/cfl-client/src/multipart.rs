//! `multipart/form-data` bodies for attachment uploads.

use std::fmt;
use std::path::Path;

use rand::RngExt;

/// A single form part.
#[derive(Clone, PartialEq, Eq)]
struct Part {
    name: String,
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

/// Multipart form with file parts.
#[derive(Clone, PartialEq, Eq)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartForm {
    /// Empty form with a random boundary.
    pub fn new() -> Self {
        Self::with_boundary(&format!(
            "----CflFormBoundary{:016x}",
            rand::rng().random::<u64>()
        ))
    }

    /// Empty form with a fixed boundary.
    pub fn with_boundary(boundary: &str) -> Self {
        Self {
            boundary: boundary.to_owned(),
            parts: Vec::new(),
        }
    }

    /// Add a file part.
    #[must_use]
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: Vec<u8>) -> Self {
        self.parts.push(Part {
            name: name.to_owned(),
            filename: filename.to_owned(),
            content_type: content_type.to_owned(),
            data,
        });
        self
    }

    /// Add a file part read from disk.
    ///
    /// The filename is the path's last component; the content type is
    /// guessed from its extension.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn file_from_path(self, name: &str, path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map_or_else(|| "file".to_owned(), |n| n.to_string_lossy().into_owned());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        Ok(self.file(name, &filename, mime.as_ref(), data))
    }

    /// Value for the `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Names of the files in the form, in order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.filename.as_str())
    }

    /// Encode the form body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let boundary = &self.boundary;
        let mut body = Vec::new();

        for part in &self.parts {
            let filename = part.filename.replace('"', "%22");
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{filename}\"\r\n",
                    part.name
                )
                .as_bytes(),
            );
            body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
            body.extend_from_slice(&part.data);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MultipartForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for part in &self.parts {
            list.entry(&format_args!(
                "{}: {} ({}, {} bytes)",
                part.name,
                part.filename,
                part.content_type,
                part.data.len()
            ));
        }
        list.finish()
    }
}
