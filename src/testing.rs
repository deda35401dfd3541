// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory [`Transport`] serving scripted responses to unit tests.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

use crate::{
    error::Error,
    forge::{Accept, ForgeResponse, Transport},
};

/// Serves queued responses per exact URL.
///
/// Responses queued for a URL are handed out in order and the last one is
/// repeated. Unknown URLs answer `404 Not Found`; URLs registered through
/// [`fail`](Self::fail) produce a transport error.
#[derive(Debug, Default,)]
pub(crate) struct ScriptedTransport
{
    routes:   RefCell<HashMap<String, VecDeque<ForgeResponse,>,>,>,
    broken:   RefCell<Vec<String,>,>,
    requests: RefCell<Vec<(String, Accept,),>,>,
}

impl ScriptedTransport
{
    pub(crate) fn new() -> Self
    {
        Self::default()
    }

    pub(crate) fn respond(&self, url: &str, status: u16, body: impl Into<String,>,)
    {
        self.routes
            .borrow_mut()
            .entry(url.to_owned(),)
            .or_default()
            .push_back(ForgeResponse::new(status, body,),);
    }

    pub(crate) fn fail(&self, url: &str,)
    {
        self.broken.borrow_mut().push(url.to_owned(),);
    }

    /// URLs requested so far, in order.
    pub(crate) fn requests(&self,) -> Vec<String,>
    {
        self.requests.borrow().iter().map(|(url, _,)| url.clone(),).collect()
    }

    pub(crate) fn accepts(&self,) -> Vec<Accept,>
    {
        self.requests.borrow().iter().map(|(_, accept,)| *accept,).collect()
    }
}

impl Transport for ScriptedTransport
{
    async fn get(&self, url: &str, accept: Accept,) -> Result<ForgeResponse, Error,>
    {
        self.requests.borrow_mut().push((url.to_owned(), accept,),);

        if self.broken.borrow().iter().any(|broken| broken == url,) {
            return Err(Error::transport(format!("connection to {url} refused"),),);
        }

        let mut routes = self.routes.borrow_mut();
        let response = match routes.get_mut(url,) {
            Some(queue,) if queue.len() > 1 => queue.pop_front(),
            Some(queue,) => queue.front().cloned(),
            None => None,
        };

        Ok(response.unwrap_or_else(|| ForgeResponse::new(404, "Not Found",),),)
    }
}
