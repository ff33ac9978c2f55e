//! Input file of `secret;address` pairs.
//!
//! The secret is the standard-alphabet base64 encoding of a 64-byte ed25519
//! keypair; the address is a base58 public key. Lines are only split here.
//! Decoding happens per line inside the top-up loop, so a malformed line
//! fails when the loop reaches it.

use base64::{prelude::BASE64_STANDARD, Engine};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::{fs, path::Path, str::FromStr};

use crate::error::{Result, TopUpError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    /// 1-based line number in the source file.
    pub number: usize,
    pub text: String,
}

#[derive(Debug)]
pub struct FundingRecord {
    pub line: usize,
    pub sender: Keypair,
    pub recipient: Pubkey,
}

pub fn read_lines(path: &Path) -> Result<Vec<InputLine>> {
    let content = fs::read_to_string(path).map_err(|source| TopUpError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_lines(&content))
}

pub fn parse_lines(content: &str) -> Vec<InputLine> {
    content
        .lines()
        .enumerate()
        .map(|(idx, text)| (idx + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty())
        .map(|(number, text)| InputLine {
            number,
            text: text.to_string(),
        })
        .collect()
}

impl InputLine {
    pub fn decode(&self) -> Result<FundingRecord> {
        let line = self.number;
        let mut fields = self.text.split(';');
        let secret = fields.next().unwrap_or_default().trim();
        let address = fields
            .next()
            .ok_or(TopUpError::MissingSeparator { line })?
            .trim();

        let secret_bytes = BASE64_STANDARD
            .decode(secret)
            .map_err(|source| TopUpError::SecretEncoding { line, source })?;
        let sender = Keypair::from_bytes(&secret_bytes).map_err(|e| TopUpError::InvalidKeypair {
            line,
            reason: e.to_string(),
        })?;
        let recipient = Pubkey::from_str(address).map_err(|source| TopUpError::InvalidAddress {
            line,
            address: address.to_string(),
            source,
        })?;

        Ok(FundingRecord {
            line,
            sender,
            recipient,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;

    fn encoded(keypair: &Keypair) -> String {
        BASE64_STANDARD.encode(keypair.to_bytes())
    }

    #[test]
    fn test_parse_lines_numbers_and_blanks() {
        let lines = parse_lines("\n a;b\r\n\nc;d\n\n");
        assert_eq!(
            lines,
            vec![
                InputLine {
                    number: 2,
                    text: "a;b".to_string()
                },
                InputLine {
                    number: 4,
                    text: "c;d".to_string()
                },
            ]
        );
        assert!(parse_lines("   \n").is_empty());
    }

    #[test]
    fn test_decode_valid_line() {
        let sender = Keypair::new();
        let recipient = Pubkey::new_unique();
        let line = InputLine {
            number: 7,
            text: format!("{};{}", encoded(&sender), recipient),
        };

        let record = line.decode().unwrap();
        assert_eq!(record.line, 7);
        assert_eq!(record.sender.pubkey(), sender.pubkey());
        assert_eq!(record.recipient, recipient);
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let sender = Keypair::new();
        let recipient = Pubkey::new_unique();
        let line = InputLine {
            number: 1,
            text: format!("{} ; {} ;comment", encoded(&sender), recipient),
        };
        assert_eq!(line.decode().unwrap().recipient, recipient);
    }

    #[test]
    fn test_decode_missing_separator() {
        let line = InputLine {
            number: 2,
            text: encoded(&Keypair::new()),
        };
        assert!(matches!(
            line.decode(),
            Err(TopUpError::MissingSeparator { line: 2 })
        ));
    }

    #[test]
    fn test_decode_bad_base64() {
        let line = InputLine {
            number: 1,
            text: format!("not*base64;{}", Pubkey::new_unique()),
        };
        assert!(matches!(
            line.decode(),
            Err(TopUpError::SecretEncoding { line: 1, .. })
        ));
    }

    #[test]
    fn test_decode_wrong_key_length() {
        let line = InputLine {
            number: 1,
            text: format!("{};{}", BASE64_STANDARD.encode([7u8; 32]), Pubkey::new_unique()),
        };
        assert!(matches!(
            line.decode(),
            Err(TopUpError::InvalidKeypair { line: 1, .. })
        ));
    }

    #[test]
    fn test_decode_bad_address() {
        let line = InputLine {
            number: 4,
            text: format!("{};not-an-address", encoded(&Keypair::new())),
        };
        match line.decode() {
            Err(TopUpError::InvalidAddress { line, address, .. }) => {
                assert_eq!(line, 4);
                assert_eq!(address, "not-an-address");
            }
            other => panic!("expected InvalidAddress, got {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_lines(Path::new("/nonexistent/addresses.txt")).unwrap_err();
        assert!(matches!(err, TopUpError::Io { .. }));
    }
}
