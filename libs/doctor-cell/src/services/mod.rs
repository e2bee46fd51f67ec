pub mod approval;
pub mod catalog;

pub use approval::DoctorApprovalService;
pub use catalog::DoctorCatalogService;
