pub mod fixtures;
mod flows;
mod http;
mod vectors;
