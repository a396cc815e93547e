use serde::Serialize;

use super::errors::ClinicError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Upper bound on page size; larger requests are rejected, not clamped.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Validated pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFilter {
  page: u32,
  limit: u32,
}

impl PageFilter {
  pub fn new(page: u32, limit: u32) -> Result<Self, ClinicError> {
    if page < 1 {
      return Err(ClinicError::invalid_action("page not valid"));
    }
    if limit < 1 || limit > MAX_PAGE_LIMIT {
      return Err(ClinicError::invalid_action(format!(
        "limit must be between 1 and {}",
        MAX_PAGE_LIMIT
      )));
    }
    Ok(Self { page, limit })
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn limit(&self) -> u32 {
    self.limit
  }

  /// Rows skipped before this page: `(page - 1) * limit`
  pub fn offset(&self) -> u64 {
    u64::from(self.page - 1) * u64::from(self.limit)
  }
}

impl Default for PageFilter {
  fn default() -> Self {
    Self {
      page: DEFAULT_PAGE,
      limit: DEFAULT_PAGE_LIMIT,
    }
  }
}

/// One page of records plus the total number of matching records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
  pub page: u32,
  pub limit: u32,
  pub total: i64,
  pub data: Vec<T>,
}

impl<T> Page<T> {
  pub fn new(filter: PageFilter, total: i64, data: Vec<T>) -> Self {
    Self {
      page: filter.page(),
      limit: filter.limit(),
      total,
      data,
    }
  }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      page: self.page,
      limit: self.limit,
      total: self.total,
      data: self.data.into_iter().map(f).collect(),
    }
  }
}
