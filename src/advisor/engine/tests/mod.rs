mod common;

mod condition;
mod fit;
