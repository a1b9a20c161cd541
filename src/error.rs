use snafu::Snafu;

#[derive(Snafu, Debug)]
pub enum SM2Error {
    InvalidParameters,
    #[snafu(display("storage error"))]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[snafu(display("stored schedule for {id} is corrupt"))]
    CorruptRecord {
        id: String,
    },
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for SM2Error {
    fn from(source: rusqlite::Error) -> Self {
        SM2Error::Storage {
            source: Box::new(source),
        }
    }
}

pub type Result<T, E = SM2Error> = std::result::Result<T, E>;
