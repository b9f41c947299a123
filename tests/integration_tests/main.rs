mod cmdline;
mod geometry;
mod import;
mod roundtrip;
mod utils;
