// Chart components
pub mod waterfall;
