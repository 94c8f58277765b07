//! CLI Exit Code Registry
//!
//! Single source of truth for `gridmark` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | Success                                   |
//! | 1    | General error (unspecified)               |
//! | 2    | Usage error (bad args)                    |
//! | 3    | I/O error (unreadable script or settings) |
//! | 4    | Script could not be parsed                |
//! | 5    | Script parsed but contains invalid cells  |
//! | 6    | Settings file invalid                     |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Script or settings file could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Script is not valid JSON or has unknown ops.
pub const EXIT_SCRIPT_PARSE: u8 = 4;

/// Script names a cell with an empty row or column id.
pub const EXIT_SCRIPT_INVALID: u8 = 5;

/// Settings file parsed but holds unusable values.
pub const EXIT_CONFIG: u8 = 6;
