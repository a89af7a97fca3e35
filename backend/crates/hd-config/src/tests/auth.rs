use crate::Config;
use crate::tests::{EnvGuard, VALID_SECRET, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_jwt_secret_too_short_when_validate_then_error_mentions_32_chars() {
    // Given
    let (_temp, _dir, _cleared) = setup_config_dir();
    let _secret = EnvGuard::set("HD_AUTH_JWT_SECRET", "tooshort");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("32 characters"));
}

#[test]
#[serial]
fn given_jwt_secret_exactly_32_chars_when_validate_then_ok() {
    let (_temp, _dir, _cleared) = setup_config_dir();
    let _secret = EnvGuard::set("HD_AUTH_JWT_SECRET", VALID_SECRET);

    let config = Config::load().unwrap();

    assert_that!(config.validate(), ok(anything()));
    assert_that!(config.auth.algorithm_name(), eq("HS256"));
}

#[test]
#[serial]
fn given_secret_and_public_key_when_validate_then_error() {
    let (_temp, _dir, _cleared) = setup_config_dir();
    let _secret = EnvGuard::set("HD_AUTH_JWT_SECRET", VALID_SECRET);
    let _key = EnvGuard::set("HD_AUTH_JWT_PUBLIC_KEY_PATH", "jwt.pem");

    let result = Config::load().unwrap().validate();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("mutually exclusive"));
}

#[test]
#[serial]
fn given_existing_public_key_when_validate_then_ok_and_path_resolved() {
    // Given
    let (temp, _dir, _cleared) = setup_config_dir();
    std::fs::write(temp.path().join("jwt.pem"), "-----BEGIN PUBLIC KEY-----").unwrap();
    let _key = EnvGuard::set("HD_AUTH_JWT_PUBLIC_KEY_PATH", "jwt.pem");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
    assert_that!(config.auth.algorithm_name(), eq("RS256"));
    assert_eq!(
        config.auth.public_key_path(temp.path()),
        Some(temp.path().join("jwt.pem"))
    );
}

#[test]
#[serial]
fn given_missing_public_key_file_when_validate_then_error() {
    let (_temp, _dir, _cleared) = setup_config_dir();
    let _key = EnvGuard::set("HD_AUTH_JWT_PUBLIC_KEY_PATH", "missing.pem");

    let result = Config::load().unwrap().validate();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("not found"));
}

#[test]
#[serial]
fn given_public_key_path_with_traversal_when_validate_then_error() {
    let (_temp, _dir, _cleared) = setup_config_dir();
    let _key = EnvGuard::set("HD_AUTH_JWT_PUBLIC_KEY_PATH", "../../etc/key.pem");

    let result = Config::load().unwrap().validate();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring(".."));
}

#[test]
#[serial]
fn given_leeway_over_limit_when_validate_then_error() {
    let (_temp, _dir, _cleared) = setup_config_dir();
    let _secret = EnvGuard::set("HD_AUTH_JWT_SECRET", VALID_SECRET);
    let _leeway = EnvGuard::set("HD_AUTH_LEEWAY_SECS", "301");

    let result = Config::load().unwrap().validate();

    assert_that!(result, err(anything()));
}
