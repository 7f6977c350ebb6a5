use std::path::PathBuf;

xflags::xflags! {
    /// Convert DataSift twitter interactions, one JSON document per line,
    /// into canonical activities written to stdout.
    cmd datasift-activity {
        /// Newline-delimited DataSift events. Read from stdin when omitted.
        optional input: PathBuf
        /// TOML configuration file.
        optional -c, --config path: PathBuf
        /// Pretty-print each activity.
        optional --pretty
        /// Write recoverable issues to stderr, one JSON line per record.
        optional --report-issues
    }
}
