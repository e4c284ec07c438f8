use thiserror::Error;

/// Hard failures while obtaining the sheet export.
///
/// An empty result or a missing selection is not an error; see `LoadState`.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not read schedule data: {0}")]
    Unreadable(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn messages() {
        let err = LoadError::Status {
            url: "https://example.test/sheet.csv".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "https://example.test/sheet.csv answered with status 404"
        );

        let io = LoadError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.to_string().starts_with("could not read schedule data"));
        assert_matches!(io, LoadError::Unreadable(_));
    }
}
