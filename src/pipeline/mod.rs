pub(crate) mod report;
pub(crate) mod run;
