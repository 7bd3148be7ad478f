use assert_cmd::Command;

#[test]
fn init_db_creates_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("books.db");

    Command::cargo_bin("bookshelf")
        .unwrap()
        .current_dir(dir.path())
        .env("BOOKSHELF_DATABASE__PATH", &db_path)
        .env("BOOKSHELF_CONFIG_DIR", dir.path())
        .arg("init-db")
        .assert()
        .success();

    assert!(db_path.exists());
}

#[test]
fn unknown_environment_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("bookshelf")
        .unwrap()
        .current_dir(dir.path())
        .args(["--env", "qa", "init-db"])
        .assert()
        .failure();
}
