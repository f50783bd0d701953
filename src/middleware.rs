use std::collections::BTreeMap;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error};
use futures::future::LocalBoxFuture;

/// Logs every request on arrival and once the response is ready.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLogging;

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLoggingMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestLoggingMiddleware<S> {
    service: Rc<S>,
}

fn query_args(query: &str) -> BTreeMap<String, String> {
    web::Query::<BTreeMap<String, String>>::from_query(query)
        .map(web::Query::into_inner)
        .unwrap_or_default()
}

impl<S, B> Service<ServiceRequest> for RequestLoggingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().clone();
        let path = req.path().to_string();
        info!(
            "Incoming {} request to {} with query: {:?}",
            method,
            path,
            query_args(req.query_string())
        );

        let started = Instant::now();
        let srv = self.service.clone();
        Box::pin(async move {
            let res = srv.call(req).await;
            let elapsed = started.elapsed().as_secs_f64();
            match &res {
                Ok(response) => info!(
                    "Completed {} request to {} in {:.4} seconds with status code {}",
                    method,
                    path,
                    elapsed,
                    response.status().as_u16()
                ),
                Err(e) => error!(
                    "Completed {} request to {} in {:.4} seconds with status code {}",
                    method,
                    path,
                    elapsed,
                    e.as_response_error().status_code().as_u16()
                ),
            }
            res
        })
    }
}
