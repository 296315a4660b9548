use cfgsync_derive::cfgsync_error;
use std::borrow::Cow;

#[cfgsync_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<Vec<u8>, DemoError> {
    let data = std::fs::read("/definitely/missing").context("Reading fixture")?;
    Ok(data)
}

fn main() {
    let err = read().unwrap_err();
    assert!(err.to_string().starts_with("IO error (Reading fixture): "));

    let internal: DemoError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");
}
