use crudgen_core::CoreError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}"));

/// Substitute every `{{key}}` in `template` in a single pass.
///
/// Substituted values are never rescanned. A placeholder without a value in
/// `context` is an error.
pub fn render_template(template: &str, context: &HashMap<&str, String>) -> Result<String, CoreError> {
    let placeholder = PLACEHOLDER
        .as_ref()
        .map_err(|e| CoreError::template(format!("Regex error: {}", e)))?;

    let mut result = String::with_capacity(template.len());
    let mut last = 0;

    for caps in placeholder.captures_iter(template) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = context.get(key.as_str()).ok_or_else(|| {
            CoreError::template(format!("no value for placeholder `{}`", key.as_str()))
        })?;

        result.push_str(&template[last..whole.start()]);
        result.push_str(value);
        last = whole.end();
    }
    result.push_str(&template[last..]);

    Ok(result)
}

/// Render `value` as a double-quoted string literal valid in TypeScript
pub fn string_literal(value: &str) -> Result<String, CoreError> {
    Ok(serde_json::to_string(value)?)
}

pub static TYPES_TEMPLATE: &str = "export type {{name}} = {\n{{fields}}\n};\n";

pub static HANDLER_PREAMBLE: &str = r##"import { DynamoDBClient } from "@aws-sdk/client-dynamodb";
import { DynamoDBDocumentClient, PutCommand, GetCommand, ScanCommand, UpdateCommand, DeleteCommand } from "@aws-sdk/lib-dynamodb";
const client = new DynamoDBClient({});
const ddb = DynamoDBDocumentClient.from(client);
const res = (code: number, body?: unknown) => ({
  statusCode: code,
  headers: {
    "Content-Type": "application/json",
    "Access-Control-Allow-Origin": "*",
    "Access-Control-Allow-Headers": "Content-Type,Authorization",
    "Access-Control-Allow-Methods": "GET,POST,PUT,DELETE,OPTIONS"
  },
  body: body === undefined ? undefined : JSON.stringify(body)
});

"##;

pub static CREATE_TEMPLATE: &str = r##"export const create{{name}} = async (event: any) => {
  if (event.httpMethod === "OPTIONS") return res(200);
  const body = typeof event.body === "string" ? JSON.parse(event.body || "{}") : (event.body || {});
  const item = { ...body, id: body.id ?? (globalThis.crypto?.randomUUID?.() ?? String(Date.now())), createdAt: Date.now() };
  await ddb.send(new PutCommand({ TableName: {{table}}, Item: item }));
  return res(201, item);
}
"##;

pub static READ_TEMPLATE: &str = r##"export const list{{name}}s = async () => {
  const out = await ddb.send(new ScanCommand({ TableName: {{table}} }));
  return res(200, out.Items ?? []);
}

export const get{{name}} = async (event: any) => {
  const id = event.pathParameters?.id;
  if (!id) return res(400, { error: "id required" });
  const out = await ddb.send(new GetCommand({ TableName: {{table}}, Key: { {{hash_key}}: id } }));
  return out.Item ? res(200, out.Item) : res(404, { error: {{not_found}} });
}
"##;

pub static UPDATE_TEMPLATE: &str = r##"export const update{{name}} = async (event: any) => {
  const id = event.pathParameters?.id;
  if (!id) return res(400, { error: "id required" });
  const body = typeof event.body === "string" ? JSON.parse(event.body || "{}") : (event.body || {});
  const names: Record<string,string> = {}; const values: Record<string,unknown> = {}; const sets: string[] = [];
  for (const [k,v] of Object.entries(body)) { if (v === undefined) continue; names["#"+k]=k; values[":"+k]=v; sets.push(`#${k} = :${k}`); }
  if (sets.length === 0) return res(400, { error: "no fields" });
  const out = await ddb.send(new UpdateCommand({
    TableName: {{table}}, Key: { {{hash_key}}: id },
    UpdateExpression: `SET ${sets.join(", ")}`,
    ExpressionAttributeNames: names,
    ExpressionAttributeValues: values,
    ReturnValues: "ALL_NEW"
  }));
  return res(200, out.Attributes);
}
"##;

pub static DELETE_TEMPLATE: &str = r##"export const delete{{name}} = async (event: any) => {
  const id = event.pathParameters?.id;
  if (!id) return res(400, { error: "id required" });
  await ddb.send(new DeleteCommand({ TableName: {{table}}, Key: { {{hash_key}}: id } }));
  return res(204);
}
"##;

pub static INDEX_TEMPLATE: &str = r##"export { create{{name}} } from "./create";
export { list{{name}}s, get{{name}} } from "./read";
export { update{{name}} } from "./update";
export { delete{{name}} } from "./delete";
"##;

pub static DIAGNOSTIC_TEMPLATE: &str = "No structures annotated with @{{marker_id}} were found.";
