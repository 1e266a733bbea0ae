//! Progress reporting for adjudication calls

pub mod reporter;
