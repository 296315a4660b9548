use cfgsync_derive::cfgsync_error;
use std::borrow::Cow;

#[cfgsync_error]
pub enum FileError {
    #[error("Read failed{}: {source}", format_context(.context))]
    Read { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Write failed{}: {source}", format_context(.context))]
    Write { source: std::io::Error, context: Option<Cow<'static, str>> },
}

fn main() {
    let read: FileError = std::io::Error::other("denied").into();
    assert!(matches!(read, FileError::Read { .. }));

    let write = FileError::Write { source: std::io::Error::other("full"), context: None };
    let write: Result<(), FileError> = Err(write);
    let write = write.context("Flushing").unwrap_err();
    assert_eq!(write.to_string(), "Write failed (Flushing): full");
}
