//! Open tokens binding a playable item and media source to a later open call.
//!
//! Wire format: `typeName_itemIdHex_sourceId`. The third segment is always
//! written, possibly empty. The pipe character is avoided because some client
//! devices silently fail HTTP requests that contain it.

use std::fmt;

use thiserror::Error;

use crate::media::ItemId;

/// Separator between token fields.
pub const TOKEN_DELIMITER: char = '_';

/// Maximum number of fields a token is split into.
const MAX_TOKEN_FIELDS: usize = 3;

/// Errors produced while building or decoding an open token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The type name is empty or contains the token delimiter.
    #[error("Invalid type name '{type_name}' for an open token")]
    InvalidTypeName {
        /// The rejected type name
        type_name: String,
    },


    /// The token does not contain both a type name and an item id.
    #[error("Malformed open token '{token}': expected at least 2 fields, found {fields}")]
    Malformed {
        /// The token as received
        token: String,
        /// Number of non-empty leading fields found
        fields: usize,
    },
}

/// Decoded form of an open token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenToken {
    pub type_name: String,
    /// Hex rendering of the item id; the channel id when opening.
    pub item_id: String,
    pub source_id: Option<String>,
}

impl OpenToken {
    /// Builds a token for an item and an optional source id.
    ///
    /// An empty source id is treated as absent. The source id is the last
    /// field, so it may contain [`TOKEN_DELIMITER`].
    ///
    /// # Errors
    ///
    /// - `TokenError::InvalidTypeName` - Type name is empty or contains the delimiter
    pub fn new(
        type_name: impl Into<String>,
        item_id: &ItemId,
        source_id: Option<&str>,
    ) -> Result<Self, TokenError> {
        let type_name = type_name.into();
        if type_name.is_empty() || type_name.contains(TOKEN_DELIMITER) {
            return Err(TokenError::InvalidTypeName { type_name });
        }

        Ok(Self {
            type_name,
            item_id: item_id.to_hex(),
            source_id: source_id.filter(|id| !id.is_empty()).map(str::to_string),
        })
    }

    /// Encodes the token into its wire form.
    pub fn encode(&self) -> String {
        let source_id = self.source_id.as_deref().unwrap_or_default();
        format!(
            "{}{TOKEN_DELIMITER}{}{TOKEN_DELIMITER}{source_id}",
            self.type_name, self.item_id
        )
    }

    /// Decodes a wire token.
    ///
    /// # Errors
    ///
    /// - `TokenError::Malformed` - Fewer than two fields, or an empty type name or item id
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let mut parts = token.splitn(MAX_TOKEN_FIELDS, TOKEN_DELIMITER);

        let type_name = parts.next().filter(|part| !part.is_empty());
        let item_id = parts.next().filter(|part| !part.is_empty());

        let (Some(type_name), Some(item_id)) = (type_name, item_id) else {
            let fields = usize::from(type_name.is_some()) + usize::from(item_id.is_some());
            return Err(TokenError::Malformed {
                token: token.to_string(),
                fields,
            });
        };

        let source_id = parts
            .next()
            .filter(|part| !part.is_empty())
            .map(str::to_string);

        tracing::trace!(type_name, item_id, ?source_id, "Decoded open token");

        Ok(Self {
            type_name: type_name.to_string(),
            item_id: item_id.to_string(),
            source_id,
        })
    }
}

impl fmt::Display for OpenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl std::str::FromStr for OpenToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
