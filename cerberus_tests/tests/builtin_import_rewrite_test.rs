use std::path::Path;

use cerberus::transform_source;
use cerberus_core::{FsProbe, ResourceTest, RewriteConfig};

fn catch_all_config(extra: &[&str]) -> RewriteConfig {
    RewriteConfig::new(extra.iter().copied(), ResourceTest::parse(".").unwrap())
}

fn rewrite(source: &str, config: &RewriteConfig) -> String {
    transform_source(source, Path::new("/nonexistent/src/App.js"), config, &FsProbe)
        .unwrap()
        .code
}

#[test]
fn excluded_modules_never_become_asset_calls() {
    let config = catch_all_config(&["lodash", "./icon.png"]);
    let cases = [
        ("react", "$REACT$"),
        ("react-native", "$REACTNATIVE$"),
        ("lodash", "$MODULES$[\"lodash\"]"),
        ("./icon.png", "$MODULES$[\"./icon.png\"]"),
    ];
    for (module, reference) in cases {
        for import_clause in ["* as M", "M"] {
            let source = format!("import {import_clause} from '{module}'\n");
            let output = rewrite(&source, &config);
            assert_eq!(output, format!("const M = {reference};\n"), "{source}");
            assert!(!output.contains("resolveAsset"));
        }
    }
}

#[test]
fn binding_order_is_preserved() {
    let output = rewrite(
        "import RN, {StyleSheet, Platform as P, View} from 'react-native'\n",
        &RewriteConfig::default(),
    );
    insta::assert_snapshot!(output, @r"
    const RN = $REACTNATIVE$;
    const StyleSheet = $REACTNATIVE$.StyleSheet;
    const P = $REACTNATIVE$.Platform;
    const View = $REACTNATIVE$.View;
    ");
}

#[test]
fn string_export_names_become_computed_lookups() {
    let output = rewrite(
        "import {'some-export' as someExport} from 'react'\n",
        &RewriteConfig::default(),
    );
    assert_eq!(output, "const someExport = $REACT$[\"some-export\"];\n");
}

#[test]
fn imports_of_unlisted_packages_keep_their_text() {
    let source = "import {debounce} from \"lodash\";\nimport * as path from 'path';\n";
    assert_eq!(rewrite(source, &RewriteConfig::default()), source);
}
