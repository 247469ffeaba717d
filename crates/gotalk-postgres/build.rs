#![forbid(unsafe_code)]

/// `embed_migrations!` cannot tell cargo to rebuild when a migration file
/// changes, so the migration directory is registered here instead.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
