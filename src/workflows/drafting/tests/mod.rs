mod common;
mod generation;
