//! Test fixtures for external-tool tests
//!
//! Generates small stand-in executables so encoder and burner
//! invocations can be exercised without the real tools installed.

#![cfg(test)]
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

fn write_script(path: &Path, body: &str) {
    std::fs::write(path, body).expect("Failed to write stub script");
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

/// Write a stub encoder that mimics the real one's argument contract
///
/// The stub creates its last argument (the output file). When
/// `fail_on` is given, any invocation whose arguments contain that
/// substring exits non-zero with an error on stderr instead.
pub fn write_stub_encoder(dir: &Path, fail_on: Option<&str>) -> PathBuf {
    let path = dir.join("stub-encoder.sh");
    let body = match fail_on {
        Some(marker) => format!(
            "#!/bin/sh\n\
             case \"$*\" in\n\
             *{}*)\n\
               echo 'simulated encode failure' >&2\n\
               exit 1\n\
               ;;\n\
             esac\n\
             for arg in \"$@\"; do last=$arg; done\n\
             : > \"$last\"\n",
            marker
        ),
        None => "#!/bin/sh\n\
                 for arg in \"$@\"; do last=$arg; done\n\
                 : > \"$last\"\n"
            .to_string(),
    };
    write_script(&path, &body);
    path
}

/// Write a stub burn tool
///
/// Succeeds silently when `succeed` is true, otherwise fails with an
/// error on stderr the way the real tool reports problems.
pub fn write_stub_burner(dir: &Path, succeed: bool) -> PathBuf {
    let path = dir.join("stub-burner.sh");
    let body = if succeed {
        "#!/bin/sh\nexit 0\n"
    } else {
        "#!/bin/sh\necho 'no device' >&2\nexit 2\n"
    };
    write_script(&path, body);
    path
}
