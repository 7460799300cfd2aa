//! Navigation command handlers.
//!
//! Thin wrappers over [`Session`] that report outcomes to the terminal.
//! Failures are printed and swallowed; navigation never ends the session.

use crate::session::Session;

/// Report the current directory.
pub fn pwd(session: &Session) {
    println!("Current directory: {}", session.cwd().display());
}

/// List directory entries, directories suffixed with `/`.
pub fn list(session: &Session, path: Option<&str>) {
    match session.list(path) {
        Ok(entries) => {
            for entry in entries {
                if entry.is_dir {
                    println!("  {}/", entry.name);
                } else {
                    println!("  {}", entry.name);
                }
            }
        }
        Err(e) => eprintln!("{e}"),
    }
}

/// Change the current directory.
pub fn change_dir(session: &mut Session, path: &str) {
    match session.change_dir(path) {
        Ok(new_dir) => println!("Changed directory to: {}", new_dir.display()),
        Err(e) => eprintln!("{e}"),
    }
}

/// Delete a regular file.
pub fn delete(session: &Session, path: &str) {
    match session.remove_file(path) {
        Ok(removed) => println!("Deleted: {}", removed.display()),
        Err(e) => eprintln!("{e}"),
    }
}
