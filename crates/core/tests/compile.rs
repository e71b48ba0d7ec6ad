//! End-to-end tests: fixture schemas on disk -> generated Go files on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};

use kmdgen_core::{
    CodegenOptions, GeneratorConfig, KmdError, ReturnPolicy, check, compile, generate,
};
use tempfile::TempDir;

fn fixtures(dir: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(dir)
}

fn config(dir: &str, out: &Path) -> GeneratorConfig {
    GeneratorConfig {
        input_root: fixtures(dir),
        schema_globs: vec!["*.kmd.json".to_string()],
        output_dir: out.to_path_buf(),
        ..GeneratorConfig::default()
    }
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

#[test]
fn test_shapes_end_to_end() {
    let out = TempDir::new().unwrap();
    let report = generate(&config("shapes", out.path())).unwrap();
    assert_eq!(report.schemas, 1);
    assert_eq!(report.classes, 1);
    assert_eq!(report.complex_types, 1);
    assert_eq!(report.files.len(), 2);

    let types = read(out.path().join("shapes_complex_types.go"));
    assert_eq!(
        types,
        "// Code generated by kmdgen from shapes.kmd.json. DO NOT EDIT.\n\npackage kurento\n\ntype Point struct {\n\tX int\n\tY int\n}\n"
    );

    let classes = read(out.path().join("shapes.go"));
    assert!(classes.contains("import \"reflect\"\n"));
    assert!(classes.contains("type IShape interface {\n\tMove(to Point) error\n}\n"));
    assert!(classes.contains("type Shape struct {\n\tconnection *Connection\n}\n"));
    assert!(classes.contains("func (elem *Shape) Move(to Point) error {\n\treq := elem.getInvokeRequest()\n"));
    assert!(classes.contains("\tif !reflect.ValueOf(to).IsZero() {\n\t\tparams[\"to\"] = to\n\t}\n"));
    assert!(classes.contains("\treturn response.Error\n}\n"));
}

#[test]
fn test_reruns_are_byte_identical() {
    let out = TempDir::new().unwrap();
    let cfg = config("media", out.path());
    let report = generate(&cfg).unwrap();
    let first: Vec<String> = report.files.iter().cloned().map(read).collect();

    generate(&cfg).unwrap();
    let second: Vec<String> = report.files.iter().cloned().map(read).collect();
    assert_eq!(first, second);
}

#[test]
fn test_media_file_layout() {
    let out = TempDir::new().unwrap();
    let report = generate(&config("media", out.path())).unwrap();
    let names: Vec<String> = report
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "core.go",
            "core_complex_types.go",
            "elements_playerendpoint.go",
            "elements_playerendpoint_complex_types.go",
        ]
    );
    assert_eq!(report.schemas, 2);
    assert_eq!(report.classes, 4);
    assert_eq!(report.complex_types, 5);
    assert_eq!(report.events, 4);
}

#[test]
fn test_interfaces_compose_along_inheritance() {
    let out = TempDir::new().unwrap();
    generate(&config("media", out.path())).unwrap();
    let core = read(out.path().join("core.go"));
    let player = read(out.path().join("elements_playerendpoint.go"));

    assert!(!core.contains("type IMediaObject interface"));
    assert!(core.contains("type MediaObject struct {\n\tconnection *Connection\n"));
    assert!(core.contains("\tParent IMediaObject\n"));
    assert!(core.contains("\tTags []Tag\n"));
    assert!(core.contains("type IMediaElement interface {\n\tConnect("));
    assert!(core.contains("type MediaElement struct {\n\tMediaObject\n}\n"));

    // The player embeds its base interface, declared in another schema.
    assert!(player.contains("type IPlayerEndpoint interface {\n\tIMediaElement\n\tPlay() error\n"));
    assert!(player.contains("type PlayerEndpoint struct {\n\tMediaElement\n"));
    assert!(player.contains("\tVideoInfo VideoInfo\n"));
    assert!(player.contains("\tPosition int64\n"));
}

#[test]
fn test_enums_keep_wire_values() {
    let out = TempDir::new().unwrap();
    generate(&config("media", out.path())).unwrap();
    let types = read(out.path().join("core_complex_types.go"));
    assert!(types.contains("// Type of media stream to be exchanged.\ntype MediaType string\n"));
    assert!(types.contains("\tMEDIATYPE_AUDIO MediaType = \"AUDIO\"\n"));
    assert!(types.contains("\tMEDIATYPE_VIDEO MediaType = \"VIDEO\"\n"));
    assert!(types.contains("\tGSTREAMERDOTDETAILS_SHOW_ALL GstreamerDotDetails = \"SHOW_ALL\"\n"));
    assert!(types.contains("type ElementConnectionData struct {\n\tSource IMediaElement\n\tSink IMediaElement\n\tType MediaType\n}\n"));
}

#[test]
fn test_method_bodies() {
    let out = TempDir::new().unwrap();
    generate(&config("media", out.path())).unwrap();
    let core = read(out.path().join("core.go"));

    assert!(core.contains(
        "Connect(sink IMediaElement, mediaType MediaType, sourceMediaDescription string) error"
    ));
    assert!(core.contains("\tif sink != nil {\n\t\tparams[\"sink\"] = fmt.Sprintf(\"%s\", sink)\n\t}\n"));
    assert!(core.contains("\tif mediaType != \"\" {\n\t\tparams[\"mediaType\"] = mediaType\n\t}\n"));
    assert!(core.contains("// Returns:\n// the graph in \"dot\" format\n"));
    assert!(core.contains(
        "\tvalue, _ := response.Result[\"value\"].(bool)\n\treturn value, response.Error\n"
    ));
    assert!(core.contains("GetSinkConnections() ([]ElementConnectionData, error)"));
    assert!(core.contains("\tret := []ElementConnectionData{}\n\treturn ret, nil\n"));
    // Parameterless methods send no operationParams.
    let sinks = core
        .find("func (elem *MediaElement) GetSinkConnections() (")
        .unwrap();
    let body = &core[sinks..];
    let end = body.find("\n}\n").unwrap();
    assert!(!body[..end].contains("operationParams"));
}

#[test]
fn test_multiline_docs_are_flattened() {
    let out = TempDir::new().unwrap();
    generate(&config("media", out.path())).unwrap();
    let core = read(out.path().join("core.go"));
    assert!(core.contains(
        "// A pipeline is a container for a collection of `MediaElements<MediaElement>`\ntype MediaPipeline struct"
    ));
}

#[test]
fn test_constructor_defaults() {
    let out = TempDir::new().unwrap();
    generate(&config("media", out.path())).unwrap();
    let player = read(out.path().join("elements_playerendpoint.go"));
    assert!(player.contains("import \"fmt\"\n"));
    assert!(player.contains(
        "\tret := map[string]interface{}{\n\t\t\"mediaPipeline\": fmt.Sprintf(\"%s\", from),\n\t\t\"uri\": \"\",\n\t\t\"useEncodedMedia\": false,\n\t\t\"networkCache\": 2000,\n\t}\n"
    ));
    assert!(player.contains("\tif position != 0 {\n"));
}

#[test]
fn test_zero_value_policy_from_config() {
    let out = TempDir::new().unwrap();
    let cfg = GeneratorConfig {
        codegen: CodegenOptions {
            return_policy: ReturnPolicy::ZeroValue,
            ..CodegenOptions::default()
        },
        ..config("media", out.path())
    };
    let (_, files) = compile(&cfg).unwrap();
    let core = &files[0].contents;
    assert!(core.contains("\tret := []ElementConnectionData{}\n\treturn ret, response.Error\n"));
    assert!(!core.contains("return nil, response.Error"));
}

#[test]
fn test_check_writes_nothing() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("gen");
    let report = check(&config("media", &target)).unwrap();
    assert_eq!(report.files.len(), 4);
    assert!(!target.exists());
}

#[test]
fn test_unresolved_type() {
    let out = TempDir::new().unwrap();
    match check(&config("errors/unresolved", out.path())).unwrap_err() {
        KmdError::UnresolvedType { name, context } => {
            assert_eq!(name, "Point");
            assert_eq!(context, "Shape.move(to)");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_schema() {
    let out = TempDir::new().unwrap();
    match check(&config("errors/malformed", out.path())).unwrap_err() {
        KmdError::SchemaParse { path, .. } => assert!(path.ends_with("broken.kmd.json")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_type() {
    let out = TempDir::new().unwrap();
    let err = check(&config("errors/duplicate", out.path())).unwrap_err();
    assert!(matches!(err, KmdError::DuplicateType { ref name, .. } if name == "Tag"));

    let cfg = GeneratorConfig {
        codegen: CodegenOptions {
            allow_type_overrides: true,
            ..CodegenOptions::default()
        },
        ..config("errors/duplicate", out.path())
    };
    let (_, files) = compile(&cfg).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    // The later declaration wins and is the only one emitted.
    assert_eq!(names, vec!["a.go", "b.go", "b_complex_types.go"]);
    assert!(files[2].contents.contains("type Tag string\n"));
}

#[test]
fn test_same_file_override_emits_one_declaration() {
    let out = TempDir::new().unwrap();
    let err = check(&config("errors/override_same_file", out.path())).unwrap_err();
    assert!(matches!(err, KmdError::DuplicateType { ref name, .. } if name == "Tag"));

    let cfg = GeneratorConfig {
        codegen: CodegenOptions {
            allow_type_overrides: true,
            ..CodegenOptions::default()
        },
        ..config("errors/override_same_file", out.path())
    };
    let (report, files) = compile(&cfg).unwrap();
    assert_eq!(report.complex_types, 2);
    assert_eq!(files.len(), 2);
    let types = &files[1].contents;
    assert_eq!(types.matches("type Tag ").count(), 1);
    assert!(types.contains("type Tag string\n"));
    assert!(!types.contains("type Tag struct"));
}

#[test]
fn test_inheritance_cycle() {
    let out = TempDir::new().unwrap();
    let err = check(&config("errors/cycle", out.path())).unwrap_err();
    assert!(matches!(err, KmdError::InheritanceCycle(_)));
}

#[test]
fn test_no_matching_schemas() {
    let out = TempDir::new().unwrap();
    let cfg = GeneratorConfig {
        schema_globs: vec!["*.idl".to_string()],
        ..config("shapes", out.path())
    };
    assert!(matches!(check(&cfg).unwrap_err(), KmdError::Config(_)));
}

#[test]
fn test_failure_leaves_output_untouched() {
    let out = TempDir::new().unwrap();
    let err = generate(&config("errors/unresolved", out.path())).unwrap_err();
    assert!(matches!(err, KmdError::UnresolvedType { .. }));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_config_file_paths_resolve_against_its_directory() {
    let dir = TempDir::new().unwrap();
    let schemas = dir.path().join("idl");
    fs::create_dir(&schemas).unwrap();
    fs::copy(
        fixtures("shapes").join("shapes.kmd.json"),
        schemas.join("shapes.kmd.json"),
    )
    .unwrap();
    let path = dir.path().join("kmdgen.toml");
    fs::write(
        &path,
        "inputRoot = \"idl\"\nschemaGlobs = [\"*.kmd.json\"]\noutputDir = \"gen\"\npackageName = \"shapes\"\n",
    )
    .unwrap();

    let cfg = GeneratorConfig::load(&path).unwrap();
    generate(&cfg).unwrap();
    let code = read(dir.path().join("gen/shapes.go"));
    assert!(code.contains("\npackage shapes\n"));
}
