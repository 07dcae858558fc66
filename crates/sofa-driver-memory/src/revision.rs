use std::fmt;

/// CouchDB-style revision: a generation counter and a random suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Revision {
    generation: u64,
    suffix: String,
}

impl Revision {
    pub(crate) fn first() -> Revision {
        Revision {
            generation: 1,
            suffix: random_hex(),
        }
    }

    pub(crate) fn next(&self) -> Revision {
        Revision {
            generation: self.generation + 1,
            suffix: random_hex(),
        }
    }

    pub(crate) fn parse(src: &str) -> Option<Revision> {
        let (generation, suffix) = src.split_once('-')?;

        Some(Revision {
            generation: generation.parse().ok()?,
            suffix: suffix.to_string(),
        })
    }

    /// A fresh document id, in the same format CouchDB's uuid service uses.
    pub(crate) fn new_id() -> String {
        random_hex()
    }
}

fn random_hex() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.generation, self.suffix)
    }
}
