// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get at everything `error_chain!` creates.
#![allow(deprecated)]

error_chain! {
    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("cannot build a {} x {} maze", width, height)
        }
    }
}
