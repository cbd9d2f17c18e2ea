use std::fmt;
use std::sync::Arc;

const PLATE_LEN: usize = 8;
const SEPARATOR: u8 = b'-';

/// A syntactically valid licence plate such as `AA-00-AA`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Plate(Arc<str>);

enum Group {
    Letters,
    Digits,
}

fn group(pair: &[u8]) -> Option<Group> {
    if pair.iter().all(u8::is_ascii_uppercase) {
        Some(Group::Letters)
    } else if pair.iter().all(u8::is_ascii_digit) {
        Some(Group::Digits)
    } else {
        None
    }
}

impl Plate {
    /// Three dash-separated pairs, each all uppercase letters or all digits,
    /// with at least one pair of each kind.
    pub fn is_valid(raw: &str) -> bool {
        let bytes = raw.as_bytes();
        if bytes.len() != PLATE_LEN || bytes[2] != SEPARATOR || bytes[5] != SEPARATOR {
            return false;
        }

        let (mut letters, mut digits) = (0, 0);
        for start in [0, 3, 6] {
            match group(&bytes[start..start + 2]) {
                Some(Group::Letters) => letters += 1,
                Some(Group::Digits) => digits += 1,
                None => return false,
            }
        }
        letters > 0 && digits > 0
    }

    pub fn parse(raw: &str) -> Option<Plate> {
        Plate::is_valid(raw).then(|| Plate(Arc::from(raw)))
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
