mod pagination;

pub use pagination::PageResponse;
