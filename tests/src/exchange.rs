mod integration;
mod restart;
