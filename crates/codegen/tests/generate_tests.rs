use crudgen_codegen::{CodeGenerator, FileManifest, MemoryManifest};
use crudgen_core::{
    CoreError, GeneratorConfig, MarkerNode, Member, ModelAccessor, ShapeKind, SmithyModel,
    StructuralDeclaration,
};
use serde_json::{json, Value};

const MARKER: &str = "demo.traits#dynamoCrud";

fn smithy(shapes: Value) -> SmithyModel {
    let doc = json!({ "smithy": "2.0", "shapes": shapes });
    SmithyModel::from_json(&doc.to_string()).unwrap()
}

fn task_model() -> SmithyModel {
    smithy(json!({
        "demo.tasks#Task": {
            "type": "structure",
            "members": {
                "title": { "target": "smithy.api#String" },
                "done": { "target": "smithy.api#Boolean" }
            },
            "traits": { MARKER: { "tableName": "Tasks" } }
        }
    }))
}

#[test]
fn test_task_round_trip() {
    let mut sink = MemoryManifest::new();
    let report = CodeGenerator::default().generate(&task_model(), &mut sink).unwrap();

    assert_eq!(report.entities, vec!["Task"]);
    assert_eq!(sink.len(), 6);
    assert_eq!(
        sink.get("crud/Task/types.ts"),
        Some("export type Task = {\n  done: boolean;\n  title: string;\n};\n")
    );

    let delete = sink.get("crud/Task/delete.ts").unwrap();
    assert!(delete.contains(
        r#"await ddb.send(new DeleteCommand({ TableName: "Tasks", Key: { "id": id } }));"#
    ));
    assert!(delete.contains("return res(204);"));
}

#[test]
fn test_full_read_handler() {
    let mut sink = MemoryManifest::new();
    CodeGenerator::default().generate(&task_model(), &mut sink).unwrap();

    let read = sink.get("crud/Task/read.ts").unwrap();
    let expected_tail = r#"export const listTasks = async () => {
  const out = await ddb.send(new ScanCommand({ TableName: "Tasks" }));
  return res(200, out.Items ?? []);
}

export const getTask = async (event: any) => {
  const id = event.pathParameters?.id;
  if (!id) return res(400, { error: "id required" });
  const out = await ddb.send(new GetCommand({ TableName: "Tasks", Key: { "id": id } }));
  return out.Item ? res(200, out.Item) : res(404, { error: "task not found" });
}
"#;
    assert!(read.ends_with(expected_tail), "{}", read);
    assert!(read.contains(r#""Access-Control-Allow-Methods": "GET,POST,PUT,DELETE,OPTIONS""#));
    assert!(read.contains(r#""Content-Type": "application/json""#));
}

#[test]
fn test_create_handler_contract() {
    let mut sink = MemoryManifest::new();
    CodeGenerator::default().generate(&task_model(), &mut sink).unwrap();

    let create = sink.get("crud/Task/create.ts").unwrap();
    assert!(create.contains(r#"if (event.httpMethod === "OPTIONS") return res(200);"#));
    assert!(create.contains(
        "id: body.id ?? (globalThis.crypto?.randomUUID?.() ?? String(Date.now())), createdAt: Date.now()"
    ));
    // unconditional put: no existence check
    assert!(create.contains(r#"new PutCommand({ TableName: "Tasks", Item: item })"#));
    assert!(!create.contains("ConditionExpression"));
    assert!(create.contains("return res(201, item);"));
}

#[test]
fn test_update_handler_contract() {
    let mut sink = MemoryManifest::new();
    CodeGenerator::default().generate(&task_model(), &mut sink).unwrap();

    let update = sink.get("crud/Task/update.ts").unwrap();
    // only undefined is skipped; null values reach the expression
    assert!(update.contains("if (v === undefined) continue;"));
    assert!(!update.contains("v === null"));
    assert!(update.contains(r#"if (sets.length === 0) return res(400, { error: "no fields" });"#));
    assert!(update.contains(r#"TableName: "Tasks", Key: { "id": id },"#));
    assert!(update.contains("UpdateExpression: `SET ${sets.join(\", \")}`,"));
    assert!(update.contains(r#"ReturnValues: "ALL_NEW""#));
    assert!(!update.contains("ConditionExpression"));
    // attribute names are aliased with a leading `#`
    assert!(update.contains(r##"names["#"+k]=k; values[":"+k]=v;"##));
    assert!(update.ends_with("  return res(200, out.Attributes);\n}\n"), "{}", update);
}

#[test]
fn test_index_groups_list_and_get() {
    let mut sink = MemoryManifest::new();
    CodeGenerator::default().generate(&task_model(), &mut sink).unwrap();

    assert_eq!(
        sink.get("crud/Task/index.ts"),
        Some(
            "export { createTask } from \"./create\";\n\
             export { listTasks, getTask } from \"./read\";\n\
             export { updateTask } from \"./update\";\n\
             export { deleteTask } from \"./delete\";\n"
        )
    );
}

#[test]
fn test_no_marked_structures_writes_only_readme() {
    let model = smithy(json!({
        "demo#Plain": { "type": "structure", "members": {} }
    }));
    let mut sink = MemoryManifest::new();
    let report = CodeGenerator::default().generate(&model, &mut sink).unwrap();

    assert!(report.is_empty());
    assert_eq!(sink.paths().collect::<Vec<_>>(), vec!["crud/README.txt"]);
    assert_eq!(
        sink.get("crud/README.txt"),
        Some("No structures annotated with @demo.traits#dynamoCrud were found.")
    );
}

#[test]
fn test_entities_do_not_share_paths() {
    let model = smithy(json!({
        "demo#Task": {
            "type": "structure",
            "members": { "title": { "target": "smithy.api#String" } },
            "traits": { MARKER: { "tableName": "Tasks" } }
        },
        "demo#User": {
            "type": "structure",
            "members": { "email": { "target": "smithy.api#String" } },
            "traits": { MARKER: { "tableName": "Users", "hashKey": "userId" } }
        }
    }));
    let mut sink = MemoryManifest::new();
    let report = CodeGenerator::default().generate(&model, &mut sink).unwrap();

    assert_eq!(report.artifacts.len(), 12);
    assert_eq!(sink.len(), 12);
    assert!(sink.paths().filter(|p| p.starts_with("crud/Task/")).count() == 6);
    assert!(sink.paths().filter(|p| p.starts_with("crud/User/")).count() == 6);

    let user_delete = sink.get("crud/User/delete.ts").unwrap();
    assert!(user_delete.contains(r#"TableName: "Users", Key: { "userId": id }"#));
}

#[test]
fn test_missing_table_name_aborts_after_earlier_entities() {
    let model = smithy(json!({
        "demo#Alpha": {
            "type": "structure",
            "members": {},
            "traits": { MARKER: { "tableName": "Alphas" } }
        },
        "demo#Beta": {
            "type": "structure",
            "members": {},
            "traits": { MARKER: { "hashKey": "betaId" } }
        },
        "demo#Gamma": {
            "type": "structure",
            "members": {},
            "traits": { MARKER: { "tableName": "Gammas" } }
        }
    }));
    let mut sink = MemoryManifest::new();
    let err = CodeGenerator::default().generate(&model, &mut sink).unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("demo#Beta"));
    assert!(sink.get("crud/Alpha/index.ts").is_some());
    assert!(sink.paths().all(|p| !p.starts_with("crud/Gamma/")));
    assert!(sink.get("crud/README.txt").is_none());
}

#[test]
fn test_custom_config_namespace_and_marker() {
    let model = smithy(json!({
        "acme#Order": {
            "type": "structure",
            "members": { "total": { "target": "smithy.api#Double" } },
            "traits": { "acme.traits#entity": { "tableName": "Orders" } }
        }
    }));
    let config = GeneratorConfig::from_yaml("marker_id: acme.traits#entity\nnamespace: gen/crud\n").unwrap();
    let mut sink = MemoryManifest::new();
    CodeGenerator::new(config).generate(&model, &mut sink).unwrap();

    assert_eq!(
        sink.get("gen/crud/Order/types.ts"),
        Some("export type Order = {\n  total: number;\n};\n")
    );
}

#[test]
fn test_structure_inherits_marker_and_members_from_mixin() {
    let model = smithy(json!({
        "demo#Base": {
            "type": "structure",
            "members": { "id": { "target": "smithy.api#String" } },
            "traits": {
                "smithy.api#mixin": {},
                MARKER: { "tableName": "Things" }
            }
        },
        "demo#Thing": {
            "type": "structure",
            "mixins": [{ "target": "demo#Base" }],
            "members": { "label": { "target": "smithy.api#String" } }
        }
    }));
    let mut sink = MemoryManifest::new();
    let report = CodeGenerator::default().generate(&model, &mut sink).unwrap();

    assert_eq!(report.entities, vec!["Thing"]);
    assert_eq!(
        sink.get("crud/Thing/types.ts"),
        Some("export type Thing = {\n  id: string;\n  label: string;\n};\n")
    );
    assert!(sink
        .get("crud/Thing/read.ts")
        .unwrap()
        .contains(r#"new ScanCommand({ TableName: "Things" })"#));
}

/// Hands out members in reverse order to prove the output does not depend on it
struct ShuffledModel {
    marker: Value,
    reversed: bool,
}

impl ModelAccessor for ShuffledModel {
    fn list_annotated_structures(&self, _marker_id: &str) -> Vec<StructuralDeclaration> {
        vec![StructuralDeclaration::from_shape_id("demo#Profile")]
    }

    fn marker(&self, _decl: &StructuralDeclaration, _marker_id: &str) -> Option<&dyn MarkerNode> {
        Some(&self.marker as &dyn MarkerNode)
    }

    fn members(&self, _decl: &StructuralDeclaration) -> Result<Vec<Member>, CoreError> {
        let mut members = vec![
            Member::new("age", ShapeKind::Integer),
            Member::new("bio", ShapeKind::String),
            Member::new("id", ShapeKind::String),
            Member::new("joined", ShapeKind::Timestamp),
            Member::new("links", ShapeKind::Set),
            Member::new("prefs", ShapeKind::Map),
            Member::new("raw", ShapeKind::Document),
        ];
        if self.reversed {
            members.reverse();
        }
        Ok(members)
    }
}

#[test]
fn test_field_order_is_stable_across_model_order() {
    let generate = |reversed| {
        let model = ShuffledModel {
            marker: json!({ "tableName": "Profiles" }),
            reversed,
        };
        let mut sink = MemoryManifest::new();
        CodeGenerator::default().generate(&model, &mut sink).unwrap();
        sink.into_files()
    };

    let forward = generate(false);
    let backward = generate(true);
    assert_eq!(forward, backward);
    assert_eq!(
        forward.get("crud/Profile/types.ts").map(String::as_str),
        Some(
            "export type Profile = {\n  age: number;\n  bio: string;\n  id: string;\n  joined: string;\n  links: any[];\n  prefs: Record<string, any>;\n  raw: any;\n};\n"
        )
    );
}

#[test]
fn test_file_manifest_run_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let generator = CodeGenerator::default();

    let mut first = FileManifest::new(dir.path());
    generator.generate(&task_model(), &mut first).unwrap();
    let before = std::fs::read_to_string(dir.path().join("crud/Task/update.ts")).unwrap();

    let mut second = FileManifest::new(dir.path());
    generator.generate(&task_model(), &mut second).unwrap();
    let after = std::fs::read_to_string(dir.path().join("crud/Task/update.ts")).unwrap();

    assert_eq!(before, after);
    assert!(!dir.path().join("crud/README.txt").exists());
}

#[test]
fn test_demo_model() {
    let model = SmithyModel::from_json(include_str!("../../../demos/tasks.json")).unwrap();
    let config = GeneratorConfig::from_yaml(include_str!("../../../demos/crudgen.yaml")).unwrap();
    let mut sink = MemoryManifest::new();
    let report = CodeGenerator::new(config).generate(&model, &mut sink).unwrap();

    assert_eq!(report.entities, vec!["Project", "Task"]);
    assert_eq!(
        sink.get("crud/Task/types.ts"),
        Some(
            "export type Task = {\n  done: boolean;\n  dueDate: string;\n  id: string;\n  priority: number;\n  tags: any[];\n  title: string;\n};\n"
        )
    );
    assert!(sink
        .get("crud/Project/read.ts")
        .unwrap()
        .contains(r#"Key: { "projectId": id }"#));
    assert!(sink
        .get("crud/Project/read.ts")
        .unwrap()
        .contains(r#"{ error: "project not found" }"#));
}
