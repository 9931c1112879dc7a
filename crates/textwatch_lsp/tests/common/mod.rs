#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tower_lsp::lsp_types::Url;
use tower_lsp::{ClientSocket, LspService, Server};

use textwatch_lsp::{Backend, ParserLoader};

pub async fn send_msg<W: AsyncWriteExt + Unpin>(writer: &mut W, msg: &str) {
    let content = format!("Content-Length: {}\r\n\r\n{}", msg.len(), msg);
    writer.write_all(content.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

pub async fn recv_msg<R: AsyncReadExt + Unpin>(reader: &mut R) -> Option<String> {
    // Simple LSP parser: read headers until \r\n\r\n, parse Content-Length, read body
    let mut buffer = Vec::new();
    let mut content_length = 0;

    loop {
        let byte = reader.read_u8().await.ok()?;
        buffer.push(byte);
        if buffer.ends_with(b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer);
            for line in headers.lines() {
                if line.to_lowercase().starts_with("content-length:") {
                    let parts: Vec<&str> = line.split(':').collect();
                    if parts.len() == 2 {
                        content_length = parts[1].trim().parse().unwrap_or_else(|e| {
                            panic!("Failed to parse Content-Length: {e}, header: {line}")
                        });
                    }
                }
            }
            break;
        }
    }

    if content_length == 0 {
        return None;
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;

    Some(String::from_utf8(body).unwrap())
}

/// An in-memory client talking to a server over `tokio::io::duplex`.
///
/// Server-to-client requests are answered automatically:
/// `window/showMessageRequest` picks the first offered action, anything else
/// gets a `null` result.
pub struct TestClient {
    writer: tokio::sync::mpsc::UnboundedSender<String>,
    inbox: UnboundedReceiver<Value>,
    /// Received messages no waiter has claimed yet, in arrival order.
    pending: VecDeque<Value>,
    next_id: i64,
}

impl TestClient {
    /// Starts a server and an initialized session rooted at `root`.
    pub async fn start(root: &std::path::Path) -> Self {
        Self::start_with(Some(root)).await
    }

    /// Starts a server and an initialized session, optionally without a root.
    pub async fn start_with(root: Option<&std::path::Path>) -> Self {
        let (service, socket) = LspService::new(Backend::new);
        Self::launch(service, socket, root).await
    }

    /// Starts a server whose linter is built on the parser from `loader`.
    pub async fn start_with_parser(root: &std::path::Path, loader: ParserLoader) -> Self {
        let (service, socket) =
            LspService::new(move |client| Backend::with_parser_loader(client, loader));
        Self::launch(service, socket, Some(root)).await
    }

    async fn launch(
        service: LspService<Backend>,
        socket: ClientSocket,
        root: Option<&std::path::Path>,
    ) -> Self {
        let (client_read, server_write) = tokio::io::duplex(1 << 16);
        let (server_read, client_write) = tokio::io::duplex(1 << 16);

        tokio::spawn(async move {
            Server::new(server_read, server_write, socket)
                .serve(service)
                .await;
        });

        let (out_tx, out_rx) = unbounded_channel::<String>();
        tokio::spawn(write_loop(client_write, out_rx));

        let (in_tx, in_rx) = unbounded_channel();
        let replies = out_tx.clone();
        tokio::spawn(async move {
            let mut reader = tokio::io::BufReader::new(client_read);
            while let Some(msg) = recv_msg(&mut reader).await {
                let value: Value = serde_json::from_str(&msg).unwrap();
                if let (Some(id), Some(method)) = (value.get("id"), value.get("method")) {
                    let result = match method.as_str() {
                        Some("window/showMessageRequest") => value["params"]["actions"]
                            .get(0)
                            .cloned()
                            .unwrap_or(Value::Null),
                        _ => Value::Null,
                    };
                    let reply = json!({ "jsonrpc": "2.0", "id": id, "result": result });
                    let _ = replies.send(reply.to_string());
                }
                if in_tx.send(value).is_err() {
                    break;
                }
            }
        });

        let mut client = Self {
            writer: out_tx,
            inbox: in_rx,
            pending: VecDeque::new(),
            next_id: 1,
        };

        let root_uri = root.map(|root| Url::from_file_path(root).unwrap());
        client
            .request("initialize", json!({ "rootUri": root_uri, "capabilities": {} }))
            .await;
        client.notify("initialized", json!({}));
        client
    }

    /// Sends a notification.
    pub fn notify(&self, method: &str, params: Value) {
        let msg = json!({ "jsonrpc": "2.0", "method": method, "params": params });
        self.writer.send(msg.to_string()).unwrap();
    }

    /// Sends a request and waits for its response, returning the result.
    pub async fn request(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        let msg = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        self.writer.send(msg.to_string()).unwrap();

        let response = self
            .wait_for(|msg| msg.get("method").is_none() && msg["id"] == json!(id))
            .await;
        response["result"].clone()
    }

    /// Opens a document.
    pub fn open(&self, uri: &Url, language_id: &str, version: i32, text: &str) {
        self.notify(
            "textDocument/didOpen",
            json!({
                "textDocument": {
                    "uri": uri,
                    "languageId": language_id,
                    "version": version,
                    "text": text,
                }
            }),
        );
    }

    /// Replaces the whole text of a document.
    pub fn change(&self, uri: &Url, version: i32, text: &str) {
        self.notify(
            "textDocument/didChange",
            json!({
                "textDocument": { "uri": uri, "version": version },
                "contentChanges": [{ "text": text }],
            }),
        );
    }

    /// Waits for the next diagnostics published for `uri`.
    pub async fn diagnostics_for(&mut self, uri: &Url) -> Vec<Value> {
        let uri = uri.to_string();
        let msg = self
            .wait_for(|msg| {
                msg["method"] == "textDocument/publishDiagnostics" && msg["params"]["uri"] == uri
            })
            .await;
        msg["params"]["diagnostics"].as_array().cloned().unwrap_or_default()
    }

    /// Waits for the next `window/showMessage` notification.
    pub async fn show_message(&mut self) -> Value {
        let msg = self
            .wait_for(|msg| msg["method"] == "window/showMessage")
            .await;
        msg["params"].clone()
    }

    /// Waits for the oldest message matching `pred`. Other messages stay
    /// queued for later waiters.
    pub async fn wait_for(&mut self, pred: impl Fn(&Value) -> bool) -> Value {
        if let Some(index) = self.pending.iter().position(&pred) {
            if let Some(msg) = self.pending.remove(index) {
                return msg;
            }
        }
        let deadline = tokio::time::sleep(Duration::from_secs(10));
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                msg = self.inbox.recv() => {
                    let msg = msg.expect("server closed the connection");
                    if pred(&msg) {
                        return msg;
                    }
                    self.pending.push_back(msg);
                }
                _ = &mut deadline => panic!("timed out waiting for a server message"),
            }
        }
    }

    /// Returns true if no message matching `pred` arrives within `wait`.
    pub async fn stays_quiet(&mut self, wait: Duration, pred: impl Fn(&Value) -> bool) -> bool {
        if self.pending.iter().any(&pred) {
            return false;
        }
        let deadline = tokio::time::sleep(wait);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                msg = self.inbox.recv() => match msg {
                    Some(msg) if pred(&msg) => return false,
                    Some(msg) => self.pending.push_back(msg),
                    None => return true,
                },
                _ = &mut deadline => return true,
            }
        }
    }
}

async fn write_loop(mut writer: DuplexStream, mut rx: UnboundedReceiver<String>) {
    while let Some(msg) = rx.recv().await {
        send_msg(&mut writer, &msg).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recv_msg_success() {
        let payload = r#"{"jsonrpc":"2.0","method":"abc","params":{}}"#;
        let data = format!("Content-Length: {}\r\n\r\n{}", payload.len(), payload);
        let mut cursor = std::io::Cursor::new(data.into_bytes());

        let result = recv_msg(&mut cursor).await;
        assert_eq!(result.unwrap(), payload);
    }

    #[tokio::test]
    #[should_panic(expected = "Failed to parse Content-Length")]
    async fn test_recv_msg_parse_error() {
        let data = "Content-Length: invalid\r\n\r\n{}";
        let mut cursor = std::io::Cursor::new(data.as_bytes().to_vec());
        let _ = recv_msg(&mut cursor).await;
    }
}
