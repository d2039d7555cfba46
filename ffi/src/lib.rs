//! C-ABI wrapper around `dog-core`.
//!
//! # Overview
//! Exposes the Dog API client through `extern "C"` functions so a native
//! host (an iOS or Android app, or anything with a C FFI) can build and parse
//! HTTP requests/responses itself without linking to Rust's async runtime or
//! serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-endpoint `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiDogResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `dog_free_*` function to release them.

pub mod types;

use std::os::raw::c_char;
use std::panic::catch_unwind;

use dog_core::BreedSelection;
use tracing_subscriber::EnvFilter;

use types::*;

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`
/// (default `info`). Returns false if a subscriber was already installed.
#[unsafe(no_mangle)]
pub extern "C" fn dog_init_logging() -> bool {
    catch_unwind(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `DogApiClient` bound to `base_url`.
///
/// Returns null if `base_url` is null, not UTF-8, not a usable base URL, or
/// if an internal panic occurs. The caller must free the returned pointer
/// with `dog_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn dog_client_new(base_url: *const c_char) -> *mut FfiDogClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { read_c_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        match dog_core::DogApiClient::new(url) {
            Ok(client) => Box::into_raw(Box::new(FfiDogClient { inner: client })),
            Err(e) => {
                tracing::warn!(error = %e, "rejected base url");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `dog_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn dog_client_free(client: *mut FfiDogClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request listing every breed.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `dog_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn dog_build_all_breeds(client: *const FfiDogClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_all_breeds())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request for random images of `breed` (API key, lower case).
///
/// Returns null if any argument is null or `breed` is not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn dog_build_breed_images(
    client: *const FfiDogClient,
    breed: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(breed) = (unsafe { read_c_str(breed) }) else {
            return std::ptr::null_mut();
        };
        FfiHttpRequest::from_core(client.inner.build_breed_images(breed))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request for random images of `sub_breed` of `breed`.
///
/// Returns null if any argument is null or not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn dog_build_sub_breed_images(
    client: *const FfiDogClient,
    breed: *const c_char,
    sub_breed: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(breed), Some(sub_breed)) =
            (unsafe { read_c_str(breed) }, unsafe { read_c_str(sub_breed) })
        else {
            return std::ptr::null_mut();
        };
        FfiHttpRequest::from_core(client.inner.build_sub_breed_images(breed, sub_breed))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Parse the response to `dog_build_all_breeds`.
///
/// Returns a result with `data_tag = BreedList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn dog_parse_all_breeds(
    client: *const FfiDogClient,
    response: *const FfiHttpResponse,
) -> *mut FfiDogResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiDogResult::null_arg("client");
        }
        if response.is_null() {
            return FfiDogResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_all_breeds(resp.to_core()) {
            Ok(breeds) => FfiDogResult::ok_breed_list(breeds),
            Err(e) => FfiDogResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiDogResult::panic("panic in dog_parse_all_breeds"))
}

/// Parse the response to either image request.
///
/// Returns a result with `data_tag = ImageList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn dog_parse_images(
    client: *const FfiDogClient,
    response: *const FfiHttpResponse,
) -> *mut FfiDogResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiDogResult::null_arg("client");
        }
        if response.is_null() {
            return FfiDogResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_images(resp.to_core()) {
            Ok(urls) => FfiDogResult::ok_image_list(urls),
            Err(e) => FfiDogResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiDogResult::panic("panic in dog_parse_images"))
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Title for the images screen: `"Beagle"`, or `"Happy Beagle"` when
/// `sub_breed` is non-null.
///
/// Returns null if `breed` is null. Free with `dog_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn dog_breed_label(breed: *const c_char, sub_breed: *const c_char) -> *mut c_char {
    catch_unwind(|| {
        let Some(breed) = (unsafe { read_c_str(breed) }) else {
            return std::ptr::null_mut();
        };
        let selection = match unsafe { read_c_str(sub_breed) } {
            Some(sub) => BreedSelection::sub_breed(breed, sub),
            None => BreedSelection::breed(breed),
        };
        into_c_string(selection.label())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by any `dog_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn dog_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free a result returned by any `dog_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn dog_free_result(result: *mut FfiDogResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiDogResult::free(result) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn dog_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| unsafe { free_c_string(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
