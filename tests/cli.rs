use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("game/WTF")).unwrap();
        Self { temp }
    }

    fn game_dir(&self) -> PathBuf {
        self.temp.path().join("game")
    }

    fn live(&self) -> PathBuf {
        self.game_dir().join("WTF")
    }

    fn write_live(&self, contents: &str) {
        fs::write(self.live().join("Account.lua"), contents).unwrap();
    }

    fn read_live(&self) -> String {
        fs::read_to_string(self.live().join("Account.lua")).unwrap()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("swapper").unwrap();
        cmd.env("SWAPPER_DATA_DIR", self.temp.path().join("data"))
            .env_remove("SWAPPER_GAME_DIR")
            .env_remove("SWAPPER_LOG")
            .arg("--game-dir")
            .arg(self.game_dir());
        cmd
    }

    fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.cmd().args(args).assert()
    }
}

fn category_dir(game_dir: &Path, category: &str) -> PathBuf {
    game_dir.join("Swapper Backups").join(category)
}

#[test]
fn categories_lists_every_label() {
    let sandbox = Sandbox::new();

    sandbox
        .run(&["categories"])
        .success()
        .stdout(predicate::str::contains("Death Knight"))
        .stdout(predicate::str::contains("Warrior"));
}

#[test]
fn init_creates_category_directories() {
    let sandbox = Sandbox::new();

    sandbox.run(&["init"]).success();

    assert!(category_dir(&sandbox.game_dir(), "Demon Hunter").is_dir());
    assert!(sandbox.temp.path().join("data/config.json").exists());
}

#[test]
fn config_persists_game_dir() {
    let sandbox = Sandbox::new();

    sandbox
        .run(&["config"])
        .success()
        .stdout(predicate::str::contains("Saved game directory"));

    let mut cmd = Command::cargo_bin("swapper").unwrap();
    cmd.env("SWAPPER_DATA_DIR", sandbox.temp.path().join("data"))
        .env_remove("SWAPPER_GAME_DIR")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            sandbox.game_dir().display().to_string(),
        ));
}

#[test]
fn switching_profiles_swaps_live_directory() {
    let sandbox = Sandbox::new();
    sandbox.run(&["init"]).success();
    sandbox
        .run(&["profile", "add", "Main", "-c", "mage", "-s", "Thrall"])
        .success();
    sandbox
        .run(&["profile", "add", "Alt", "-c", "paladin", "-s", "Jaina"])
        .success();

    sandbox.write_live("thrall");
    sandbox.run(&["profile", "activate", "Main"]).success();

    sandbox
        .run(&["profile", "activate", "Alt"])
        .success()
        .stdout(predicate::str::contains("Saved outgoing state"))
        .stdout(predicate::str::contains("No backup to restore"));
    assert_eq!(sandbox.read_live(), "thrall");

    sandbox.write_live("jaina");
    sandbox
        .run(&["profile", "activate", "main"])
        .success()
        .stdout(predicate::str::contains("Restored: Mage/Thrall-"));
    assert_eq!(sandbox.read_live(), "thrall");

    sandbox
        .run(&["backup", "list", "paladin"])
        .success()
        .stdout(predicate::str::contains("Jaina-"));

    sandbox
        .run(&["history", "-n", "50"])
        .success()
        .stdout(predicate::str::contains("ACTIVATE"))
        .stdout(predicate::str::contains("RESTORE"));
}

#[test]
fn profile_list_marks_active() {
    let sandbox = Sandbox::new();
    sandbox
        .run(&["profile", "add", "Main", "-c", "death knight", "-s", "Thrall"])
        .success();
    sandbox.run(&["profile", "activate", "Main"]).success();

    sandbox
        .run(&["profile", "list"])
        .success()
        .stdout(predicate::str::contains("Death Knight"))
        .stdout(predicate::str::contains("*"));
}

#[test]
fn add_rejects_unknown_category() {
    let sandbox = Sandbox::new();

    sandbox
        .run(&["profile", "add", "Main", "-c", "bard", "-s", "Thrall"])
        .failure()
        .stderr(predicate::str::contains("Unknown category"));
}

#[test]
fn add_rejects_subject_with_separator() {
    let sandbox = Sandbox::new();

    sandbox
        .run(&["profile", "add", "Main", "-c", "mage", "-s", "Thrall-Alt"])
        .failure()
        .stderr(predicate::str::contains("Validation error"));
}

#[test]
fn delete_requires_force_and_keeps_backups() {
    let sandbox = Sandbox::new();
    sandbox.write_live("thrall");
    sandbox
        .run(&["profile", "add", "Main", "-c", "mage", "-s", "Thrall"])
        .success();
    sandbox.run(&["profile", "backup", "Main"]).success();

    sandbox
        .run(&["profile", "delete", "Main"])
        .success()
        .stdout(predicate::str::contains("--force"));
    sandbox.run(&["profile", "show", "Main"]).success();

    sandbox.run(&["profile", "delete", "Main", "--force"]).success();
    sandbox
        .run(&["profile", "show", "Main"])
        .failure()
        .stderr(predicate::str::contains("Profile not found"));

    let backups = fs::read_dir(category_dir(&sandbox.game_dir(), "Mage"))
        .unwrap()
        .count();
    assert_eq!(backups, 1);
}

#[test]
fn backup_restore_requires_force() {
    let sandbox = Sandbox::new();
    sandbox.write_live("thrall");
    sandbox
        .run(&["profile", "add", "Main", "-c", "mage", "-s", "Thrall"])
        .success();
    sandbox.run(&["profile", "backup", "Main"]).success();
    sandbox.write_live("edited");

    sandbox.run(&["backup", "restore", "mage", "latest"]).success();
    assert_eq!(sandbox.read_live(), "edited");

    sandbox
        .run(&["backup", "restore", "mage", "latest", "--force"])
        .success()
        .stdout(predicate::str::contains("Restore complete"));
    assert_eq!(sandbox.read_live(), "thrall");
}

#[test]
fn backup_restore_unknown_folder_fails() {
    let sandbox = Sandbox::new();

    sandbox
        .run(&["backup", "restore", "mage", "Nobody-2020-01-01-00-00-00", "--force"])
        .failure()
        .stderr(predicate::str::contains("Backup not found"));
}

#[test]
fn history_reports_truncation() {
    let sandbox = Sandbox::new();
    sandbox
        .run(&["profile", "add", "Main", "-c", "mage", "-s", "Thrall"])
        .success();
    sandbox
        .run(&["profile", "add", "Alt", "-c", "paladin", "-s", "Jaina"])
        .success();

    sandbox
        .run(&["history", "-n", "1"])
        .success()
        .stdout(predicate::str::contains("(Alt)"))
        .stdout(predicate::str::contains("(Main)").not())
        .stdout(predicate::str::contains("Showing 1 of 2 entries."));
}

#[test]
fn config_shows_initialization_state() {
    let sandbox = Sandbox::new();

    let mut cmd = Command::cargo_bin("swapper").unwrap();
    cmd.env("SWAPPER_DATA_DIR", sandbox.temp.path().join("data"))
        .env_remove("SWAPPER_GAME_DIR")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:      no"));

    sandbox.run(&["init"]).success();
    sandbox
        .run(&["config"])
        .success()
        .stdout(predicate::str::contains("Initialized:      yes"));
}
