#[cfg(test)]
mod exchange;
#[cfg(test)]
mod util;
