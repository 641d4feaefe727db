/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2, // Same status clap uses for usage errors
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
