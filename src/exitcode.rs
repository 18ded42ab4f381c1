//! Process exit codes (BSD sysexits.h compatible)

/// Bad command line, unknown checkbox name, or config already present
pub const USAGE: i32 = 64;

/// Malformed page: unparsable fixture or cyclic parent names
pub const DATAERR: i32 = 65;

/// Engine invariant broken (e.g. a node id from another forest)
pub const SOFTWARE: i32 = 70;

/// Page fixture or config file could not be read or written
pub const IOERR: i32 = 74;

/// Invalid settings or counter pattern
pub const CONFIG: i32 = 78;
