use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client, Request};
use reqwest::StatusCode;
use std::fmt::{self, Formatter};
use std::io;
use std::time::Duration;
use url::Url;

/// 固定的探测地址
pub const TARGET_URL: &str =
    "http://127.0.0.1:8000/822f3d5b9c91b570a4f1848c5d147b4709d2fb96/no_auth";

/// 请求描述: 目标地址 + GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    url: Url,
}

impl RequestDescriptor {
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("invalid target url {:?}", url))?;
        Ok(RequestDescriptor { url })
    }
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.url)
    }
}

/// 全局 http 会话, drop 时释放
pub struct Session {
    client: Option<Client>,
}

impl Session {
    pub fn open() -> Self {
        let client = Client::builder()
            // 不设置超时, 无响应的服务端会让探测一直阻塞
            .timeout(None::<Duration>)
            .no_proxy()
            .pool_max_idle_per_host(0)
            .build();
        match client {
            Ok(client) => {
                debug!("client session opened");
                Session {
                    client: Some(client),
                }
            }
            Err(err) => {
                warn!("could not initialize http client: {}", err);
                Session { client: None }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    /// 获取绑定到目标地址的请求句柄
    pub fn handle(&self, descriptor: &RequestDescriptor) -> Result<RequestHandle<'_>> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| anyhow!("http client is not initialized"))?;
        let request = client
            .get(descriptor.url().clone())
            .build()
            .context("could not build request")?;
        Ok(RequestHandle { client, request })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.client.take().is_some() {
            debug!("client session released");
        }
    }
}

/// 单次请求句柄
pub struct RequestHandle<'a> {
    client: &'a Client,
    request: Request,
}

impl<'a> RequestHandle<'a> {
    /// 同步发送请求并读完响应体, 响应内容丢弃
    pub fn perform(self) -> Result<StatusCode> {
        let mut response = self.client.execute(self.request)?;
        let status = response.status();
        io::copy(&mut response, &mut io::sink()).context("could not read response body")?;
        Ok(status)
    }
}
