pub(crate) mod utils;
