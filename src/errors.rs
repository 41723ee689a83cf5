// Other modules in this crate `use crate::errors::*;` to get the Error, ErrorKind,
// ResultExt and Result types that `error_chain!` creates.
// Result is a typedef of std `Result` with the error type our own `Error`.

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        OutOfBounds(x: u32, y: u32) {
            description("grid coordinate out of bounds")
            display("coordinate ({}, {}) is outside the maze grid", x, y)
        }
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}", width, height)
        }
        CorruptData(reason: String) {
            description("corrupt maze data")
            display("corrupt maze data: {}", reason)
        }
        GridAlreadyCarved {
            description("maze grid already has passages")
            display("maze generation needs a grid with every wall closed")
        }
        MissingSetting(key: String) {
            description("missing setting")
            display("missing setting '{}'", key)
        }
        InvalidSetting(key: String, value: String) {
            description("invalid setting value")
            display("invalid value '{}' for setting '{}'", value, key)
        }
    }
}
