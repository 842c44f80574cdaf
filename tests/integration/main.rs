//! Integration tests for setup-esbuild

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the host's config and runner variables
    fn setup_esbuild(home: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("setup-esbuild");
        cmd.env("SETUP_ESBUILD_CONFIG", home.join("config.toml"))
            .env_remove("INPUT_VERSION")
            .env_remove("RUNNER_TOOL_CACHE")
            .env_remove("GITHUB_PATH")
            .env_remove("GITHUB_OUTPUT")
            .env_remove("GITHUB_ACTIONS");
        for var in ["ALL_PROXY", "HTTP_PROXY", "HTTPS_PROXY", "all_proxy", "http_proxy", "https_proxy"] {
            cmd.env_remove(var);
        }
        cmd
    }

    fn host_arch() -> String {
        setup_esbuild::platform::Platform::detect().arch
    }

    fn seed_cache(root: &Path, version: &str, arch: &str) -> std::path::PathBuf {
        let dir = root.join("esbuild").join(version).join(arch);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("esbuild"), b"#!/bin/sh\n").unwrap();
        fs::write(root.join("esbuild").join(version).join(format!("{}.complete", arch)), b"").unwrap();
        dir
    }

    #[test]
    fn help_displays() {
        let home = TempDir::new().unwrap();
        setup_esbuild(home.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("install esbuild on CI runners"));
    }

    #[test]
    fn version_displays() {
        let home = TempDir::new().unwrap();
        setup_esbuild(home.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("setup-esbuild"));
    }

    #[test]
    fn find_reports_missing_entry() {
        let home = TempDir::new().unwrap();
        setup_esbuild(home.path())
            .args(["find", "0.24.0", "--arch", "x64", "--cache-dir"])
            .arg(home.path().join("cache"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not in the tool cache"));
    }

    #[test]
    fn find_prints_cached_dir() {
        let home = TempDir::new().unwrap();
        let dir = seed_cache(&home.path().join("cache"), "0.24.0", "x64");

        setup_esbuild(home.path())
            .args(["find", "0.24.0", "--arch", "x64", "--cache-dir"])
            .arg(home.path().join("cache"))
            .assert()
            .success()
            .stdout(predicate::str::contains(dir.display().to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn install_uses_cached_entry() {
        let home = TempDir::new().unwrap();
        let dir = seed_cache(&home.path().join("cache"), "0.24.0", &host_arch());
        let path_file = home.path().join("github_path");
        let output_file = home.path().join("github_output");

        setup_esbuild(home.path())
            .args(["install", "--tool-version", "0.24.0", "--cache-dir"])
            .arg(home.path().join("cache"))
            .env("GITHUB_PATH", &path_file)
            .env("GITHUB_OUTPUT", &output_file)
            .assert()
            .success()
            .stdout(predicate::str::contains("Using cached esbuild 0.24.0"));

        assert_eq!(
            fs::read_to_string(&path_file).unwrap(),
            format!("{}\n", dir.display())
        );
        let outputs = fs::read_to_string(&output_file).unwrap();
        assert!(outputs.contains("version=0.24.0\n"));
        assert!(outputs.contains(&format!("path={}\n", dir.display())));
    }

    #[cfg(unix)]
    #[test]
    fn install_reads_version_input() {
        let home = TempDir::new().unwrap();
        seed_cache(&home.path().join("cache"), "0.23.1", &host_arch());

        setup_esbuild(home.path())
            .args(["install", "--cache-dir"])
            .arg(home.path().join("cache"))
            .env("INPUT_VERSION", "0.23.1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Using cached esbuild 0.23.1"));
    }

    #[cfg(unix)]
    #[test]
    fn blank_version_flag_uses_input() {
        let home = TempDir::new().unwrap();
        seed_cache(&home.path().join("cache"), "0.23.1", &host_arch());

        setup_esbuild(home.path())
            .args(["install", "--tool-version", "", "--cache-dir"])
            .arg(home.path().join("cache"))
            .env("INPUT_VERSION", "0.23.1")
            .assert()
            .success()
            .stdout(predicate::str::contains("Using cached esbuild 0.23.1"));
    }

    #[cfg(unix)]
    #[test]
    fn install_miss_populates_cache_and_path() {
        let home = TempDir::new().unwrap();
        let scripts = home.path().join("scripts");
        let work = home.path().join("work");
        fs::create_dir_all(&scripts).unwrap();
        fs::create_dir_all(&work).unwrap();
        fs::write(
            scripts.join("dl0.24.0.sh"),
            "printf '#!/bin/sh\\necho 0.24.0\\n' > esbuild\n",
        )
        .unwrap();
        fs::write(
            home.path().join("config.toml"),
            format!(
                "[install]\nscript_url_template = \"file://{}/dl{{version}}.sh\"\n",
                scripts.display()
            ),
        )
        .unwrap();
        let cache = home.path().join("cache");
        let path_file = home.path().join("github_path");
        let output_file = home.path().join("github_output");

        setup_esbuild(home.path())
            .args(["install", "--tool-version", "0.24.0", "--cache-dir"])
            .arg(&cache)
            .arg("--work-dir")
            .arg(&work)
            .env("GITHUB_PATH", &path_file)
            .env("GITHUB_OUTPUT", &output_file)
            .assert()
            .success()
            .stdout(predicate::str::contains("Installed esbuild 0.24.0"));

        let arch = host_arch();
        let dir = cache.join("esbuild").join("0.24.0").join(&arch);
        assert_eq!(
            fs::read_to_string(dir.join("esbuild")).unwrap(),
            "#!/bin/sh\necho 0.24.0\n"
        );
        assert!(cache
            .join("esbuild")
            .join("0.24.0")
            .join(format!("{}.complete", arch))
            .is_file());
        assert_eq!(
            fs::read_to_string(&path_file).unwrap(),
            format!("{}\n", dir.display())
        );
        let outputs = fs::read_to_string(&output_file).unwrap();
        assert!(outputs.contains("version=0.24.0\n"));
        assert!(outputs.contains(&format!("path={}\n", dir.display())));

        // Second run is served from the cache without touching the script
        fs::remove_file(scripts.join("dl0.24.0.sh")).unwrap();
        setup_esbuild(home.path())
            .args(["install", "--tool-version", "0.24.0", "--cache-dir"])
            .arg(&cache)
            .arg("--work-dir")
            .arg(&work)
            .assert()
            .success()
            .stdout(predicate::str::contains("Using cached esbuild 0.24.0"));
    }

    #[cfg(unix)]
    #[test]
    fn install_failure_is_reported_once() {
        let home = TempDir::new().unwrap();
        fs::write(
            home.path().join("config.toml"),
            "[install]\nscript_url_template = \"http://127.0.0.1:9/v{version}\"\n",
        )
        .unwrap();
        let path_file = home.path().join("github_path");

        setup_esbuild(home.path())
            .args(["install", "--tool-version", "0.24.0", "--cache-dir"])
            .arg(home.path().join("cache"))
            .arg("--work-dir")
            .arg(home.path())
            .env("GITHUB_ACTIONS", "true")
            .env("GITHUB_PATH", &path_file)
            .assert()
            .failure()
            .stdout(predicate::str::contains("::error::Failed to install esbuild"));

        assert!(!path_file.exists());
        assert!(!home.path().join("cache").join("esbuild").exists());
    }

    #[cfg(unix)]
    #[test]
    fn install_reports_feed_status() {
        use std::io::{BufRead, BufReader, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            stream
                .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .unwrap();
        });

        let home = TempDir::new().unwrap();
        fs::write(
            home.path().join("config.toml"),
            format!("[release]\napi_url = \"http://{}/releases/latest\"\n", addr),
        )
        .unwrap();

        setup_esbuild(home.path())
            .args(["install", "--cache-dir"])
            .arg(home.path().join("cache"))
            .env("GITHUB_ACTIONS", "true")
            .assert()
            .failure()
            .stdout(predicate::str::contains(
                "::error::Failed to fetch latest version: Not Found",
            ));
    }

    #[test]
    fn config_path() {
        let home = TempDir::new().unwrap();
        setup_esbuild(home.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let home = TempDir::new().unwrap();
        setup_esbuild(home.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[install]"));
    }

    #[test]
    fn config_set_persists() {
        let home = TempDir::new().unwrap();
        setup_esbuild(home.path())
            .args(["config", "set", "install.binding", "resolved"])
            .assert()
            .success();

        let saved = fs::read_to_string(home.path().join("config.toml")).unwrap();
        assert!(saved.contains("binding = \"resolved\""));
    }

    #[test]
    fn config_set_unknown_key_leaves_file() {
        let home = TempDir::new().unwrap();
        let config_file = home.path().join("config.toml");
        fs::write(&config_file, "[install]\nbinding = \"resolved\"\n").unwrap();

        setup_esbuild(home.path())
            .args(["config", "set", "install.mirror", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("install.mirror"));

        assert_eq!(
            fs::read_to_string(&config_file).unwrap(),
            "[install]\nbinding = \"resolved\"\n"
        );
    }

    #[test]
    fn completions_bash() {
        let home = TempDir::new().unwrap();
        setup_esbuild(home.path())
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("setup-esbuild"));
    }
}
