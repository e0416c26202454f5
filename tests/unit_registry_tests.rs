//! # Registry Scanner Unit Tests / 注册表扫描器单元测试
//!
//! Tests for plugin-root scanning: ordering, the single-name filter and the
//! fatal missing-root error.
//!
//! 插件根目录扫描的测试：排序、单名称过滤器和根目录缺失的致命错误。

mod common;

use pluma_harness::core::registry::scan;
use std::fs;

#[test]
fn test_missing_root_is_fatal() {
    let (temp, _plugins) = common::corpus();
    let missing = temp.path().join("nowhere");

    assert!(scan(&missing, None).is_err());
}

#[test]
fn test_scan_returns_cases_sorted_by_name() {
    let (_temp, plugins) = common::corpus();
    common::add_plugin(&plugins, "Velvet");
    common::add_plugin(&plugins, "CSVNormalize");
    common::add_plugin(&plugins, "Infomap");

    let cases = scan(&plugins, None).unwrap();
    let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, ["CSVNormalize", "Infomap", "Velvet"]);
}

#[test]
fn test_non_directories_are_skipped_silently() {
    let (_temp, plugins) = common::corpus();
    common::add_plugin(&plugins, "Echo");
    fs::write(plugins.join("README"), "not a plugin").unwrap();
    fs::write(plugins.join("getPool.py"), "not a plugin either").unwrap();

    let cases = scan(&plugins, None).unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].name, "Echo");
}

#[test]
fn test_filter_selects_one_existing_case() {
    let (_temp, plugins) = common::corpus();
    common::add_plugin(&plugins, "Echo");
    common::add_plugin(&plugins, "Velvet");

    let cases = scan(&plugins, Some("Echo")).unwrap();

    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].name, "Echo");
    assert_eq!(cases[0].example_dir, plugins.join("Echo").join("example"));
}

#[test]
fn test_filter_for_missing_case_yields_empty_list() {
    let (_temp, plugins) = common::corpus();
    common::add_plugin(&plugins, "Echo");

    let cases = scan(&plugins, Some("Ghost")).unwrap();

    assert!(cases.is_empty());
}

#[test]
fn test_empty_root_yields_empty_list() {
    let (_temp, plugins) = common::corpus();

    assert!(scan(&plugins, None).unwrap().is_empty());
}
