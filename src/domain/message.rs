use {
    derive_more::Display,
    serde::Serialize,
    std::collections::BTreeMap,
};

/// Key into the message catalog (`template.error.widget.notFound`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct MessageKey(&'static str);

impl MessageKey {
    pub const WIDGET_NOT_FOUND: MessageKey = MessageKey("template.error.widget.notFound");
    pub const WIDGET_ID_MISMATCH: MessageKey = MessageKey("template.error.widget.id.mismatch");
    pub const WIDGET_CODE_DUPLICATED: MessageKey =
        MessageKey("template.error.widget.code.duplicated");
    pub const JAVERS_EXISTING_ENTRY: MessageKey =
        MessageKey("template.error.javers.entryAlreadyExists");
    pub const PAGE_SIZE_INVALID: MessageKey = MessageKey("template.error.pagination.sizeInvalid");
    pub const INTERNAL: MessageKey = MessageKey("template.error.internal");

    pub const ALL: [MessageKey; 6] = [
        Self::WIDGET_NOT_FOUND,
        Self::WIDGET_ID_MISMATCH,
        Self::WIDGET_CODE_DUPLICATED,
        Self::JAVERS_EXISTING_ENTRY,
        Self::PAGE_SIZE_INVALID,
        Self::INTERNAL,
    ];

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Database constraint name → message key shown to the client.
pub const CONSTRAINT_MAP: &[(&str, MessageKey)] =
    &[("unq_widget_code", MessageKey::WIDGET_CODE_DUPLICATED)];

pub fn constraint_message_key(constraint: &str) -> Option<MessageKey> {
    CONSTRAINT_MAP
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, key)| *key)
}

/// Locale of error bodies and `/messages`.
///
/// Chosen once from `DEFAULT_LOCALE` at startup rather than per request, as
/// `en` is the only catalog shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Locale {
    #[display("en")]
    En,
}

impl Locale {
    pub const SUPPORTED: [Locale; 1] = [Locale::En];

    /// Accepts a bare language tag or one with a region (`en`, `en-US`, `en_GB`).
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    fn catalog(&self) -> &'static [(MessageKey, &'static str)] {
        match self {
            Locale::En => EN,
        }
    }
}

const EN: &[(MessageKey, &str)] = &[
    (MessageKey::WIDGET_NOT_FOUND, "Widget not found"),
    (
        MessageKey::WIDGET_ID_MISMATCH,
        "Widget id in the request path does not match the id in the request body",
    ),
    (
        MessageKey::WIDGET_CODE_DUPLICATED,
        "A widget with the given code already exists",
    ),
    (
        MessageKey::JAVERS_EXISTING_ENTRY,
        "Audit log already holds a snapshot for this entity",
    ),
    (
        MessageKey::PAGE_SIZE_INVALID,
        "Page size must be greater than zero",
    ),
    (MessageKey::INTERNAL, "An internal error occurred"),
];

/// Looks up the text for `key` in `locale`.
pub fn localize(locale: Locale, key: MessageKey) -> Option<&'static str> {
    locale
        .catalog()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
}

pub fn all_messages(locale: Locale) -> BTreeMap<&'static str, &'static str> {
    locale
        .catalog()
        .iter()
        .map(|(key, text)| (key.as_str(), *text))
        .collect()
}

/// Error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedMessage {
    pub message_key: String,
    pub message: String,
}

impl LocalizedMessage {
    /// Falls back to the key itself when the catalog has no entry.
    pub fn new(locale: Locale, key: MessageKey) -> Self {
        Self {
            message_key: key.as_str().to_string(),
            message: localize(locale, key).unwrap_or(key.as_str()).to_string(),
        }
    }

    /// For errors with no catalog entry, e.g. an unmapped database constraint.
    pub fn raw(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            message_key: text.clone(),
            message: text,
        }
    }
}
