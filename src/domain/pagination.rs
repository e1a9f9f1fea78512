use {
    super::{error::ServiceError, message::MessageKey},
    serde::{Deserialize, Serialize},
};

/// Page numbers are zero-based.
pub const DEFAULT_PAGE_NUMBER: u32 = 0;

/// Default size for plain listings.
pub const DEFAULT_PAGE_SIZE: u32 = 2000;

/// Used when the caller wants everything, e.g. an audit log without `size`.
pub const UNBOUNDED_PAGE_SIZE: u32 = i32::MAX as u32;

/// `?page=&size=` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageParams {
    pub fn to_pageable(self, default_size: u32) -> Result<Pageable, ServiceError> {
        Pageable::new(
            self.page.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.size.unwrap_or(default_size),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    number: u32,
    size: u32,
}

impl Pageable {
    pub fn new(number: u32, size: u32) -> Result<Self, ServiceError> {
        if size == 0 {
            return Err(ServiceError::Validation(MessageKey::PAGE_SIZE_INVALID));
        }
        Ok(Self { number, size })
    }

    pub fn unbounded() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: UNBOUNDED_PAGE_SIZE,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.number) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// Response envelope for paged listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u32,
    pub number: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    /// Wraps content that already is exactly the requested page.
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(pageable.size));
        let number = pageable.number;
        Self {
            number_of_elements: content.len(),
            content,
            total_elements,
            total_pages,
            size: pageable.size,
            number,
            first: number == 0,
            last: u64::from(number) + 1 >= total_pages,
        }
    }

    /// Cuts the requested page out of the full list.
    pub fn from_list(all: Vec<T>, pageable: &Pageable) -> Self {
        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(pageable.offset() as usize)
            .take(pageable.limit() as usize)
            .collect();
        Self::new(content, pageable, total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
        }
    }
}
