pub mod allocations;
pub mod certifications;
pub mod employees;
pub mod projects;
pub mod transitions;
