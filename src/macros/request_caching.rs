/// check if a response for this request path is cached, if it is, return it.
/// else follow the normal flow
///
/// does nothing when debug enabled
macro_rules! read_cache_request {
    ( $origin:expr ) => {
        if !cfg!(debug_assertions) {
            let uri = $origin.path().to_string();
            match &mut Redis::connect() {
                Ok(r_conn) => {
                    if Redis::has_data::<String>(r_conn, uri.clone()).unwrap_or(false) {
                        if let Ok(data) = Redis::get_data::<String, String>(r_conn, uri) {
                            return Ok(data);
                        }
                    }
                }
                Err(error) => {
                    error!(target:"macros/request_caching", "Error connecting to redis: {}", error);
                }
            }
        }
    };
}

/// add the serialized response to the cache and then return it.
///
/// if debug is enabled we wont add to cache.
macro_rules! cache_response {
    ( $origin:expr, $data:expr ) => {
        if !cfg!(debug_assertions) {
            let uri = $origin.path().to_string();
            match &mut Redis::connect() {
                Ok(r_conn) => {
                    let _ = Redis::set_data::<String, String>(r_conn, uri, $data.clone());
                }
                Err(error) => {
                    error!(target:"macros/request_caching", "Error connecting to redis: {}", error);
                }
            }
        }

        return Ok($data);
    };
}

pub(crate) use cache_response;
pub(crate) use read_cache_request;
