//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer plus length instead of `Vec`,
//! and tagged enums with explicit discriminants. Conversion functions live
//! here to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use dog_core::error::ApiError;
use dog_core::http::{HttpMethod, HttpResponse};
use dog_core::types::Breed;

/// Opaque handle to a `DogApiClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiDogClient {
    pub(crate) inner: dog_core::DogApiClient,
}

// ---------------------------------------------------------------------------
// Allocation helpers
// ---------------------------------------------------------------------------

/// Interior NULs cannot cross into C, so they are dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let c = CString::new(s).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|b| *b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    c.into_raw()
}

/// Borrow a C string as UTF-8. Invalid UTF-8 reads as `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn read_c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Hand a `Vec` to C as pointer plus length; null when empty.
pub(crate) fn leak_slice<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    (Box::into_raw(items.into_boxed_slice()) as *mut T, len)
}

/// Take back a slice made by `leak_slice`.
///
/// # Safety
/// `ptr`/`len` must come from one `leak_slice` call and not be reclaimed twice.
pub(crate) unsafe fn reclaim_slice<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

/// # Safety
/// `ptr` must be null or come from `into_c_string`.
pub(crate) unsafe fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `dog_build_*` functions. The C caller executes the request
/// and passes the response back through `dog_parse_*`. Dog API requests
/// never carry a body.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: dog_core::HttpRequest) -> *mut Self {
        let headers = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: into_c_string(k),
                value: into_c_string(v),
            })
            .collect();
        let (headers, headers_len) = leak_slice(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: into_c_string(req.url),
            headers,
            headers_len,
        }))
    }

    /// # Safety
    /// `req` must come from `from_core` and not be freed twice.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        unsafe { free_c_string(req.url) };
        for header in unsafe { reclaim_slice(req.headers, req.headers_len) } {
            unsafe {
                free_c_string(header.key);
                free_c_string(header.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `dog_parse_*` function. `reason` and `body`
/// may be null. The FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub reason: *const c_char,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    pub(crate) fn to_core(&self) -> HttpResponse {
        let reason = unsafe { read_c_str(self.reason) }.unwrap_or_default();
        let body = unsafe { read_c_str(self.body) }.unwrap_or_default();
        HttpResponse::new(self.status, reason, body)
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiDogResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Transport = 2,
    Deserialization = 3,
    InvalidBaseUrl = 4,
    Panic = 5,
    NullArg = 6,
}

/// Tag that tells `dog_free_result` what `FfiDogResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    BreedList = 1,
    ImageList = 2,
}

/// A list of C strings.
#[repr(C)]
pub struct FfiStringList {
    pub items: *mut *mut c_char,
    pub len: u32,
}

impl FfiStringList {
    fn from_core(strings: Vec<String>) -> Self {
        let (items, len) = leak_slice(strings.into_iter().map(into_c_string).collect());
        Self { items, len }
    }

    /// # Safety
    /// `self` must come from `from_core`.
    unsafe fn free_fields(&self) {
        for s in unsafe { reclaim_slice(self.items, self.len) } {
            unsafe { free_c_string(s) };
        }
    }
}

/// A breed exposed to C. `sub_breeds.len` is zero for a plain breed.
#[repr(C)]
pub struct FfiBreed {
    pub name: *mut c_char,
    pub sub_breeds: FfiStringList,
}

/// A list of breeds exposed to C, in API order.
#[repr(C)]
pub struct FfiBreedList {
    pub items: *mut FfiBreed,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiDogResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiDogResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiDogResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn error(error_code: FfiErrorCode, http_status: u16, message: String) -> *mut Self {
        Box::into_raw(Box::new(FfiDogResult {
            error_code,
            error_message: into_c_string(message),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_breed_list(breeds: Vec<Breed>) -> *mut Self {
        let items = breeds
            .into_iter()
            .map(|b| FfiBreed {
                name: into_c_string(b.name),
                sub_breeds: FfiStringList::from_core(b.sub_breeds),
            })
            .collect();
        let (items, len) = leak_slice(items);
        let list = Box::new(FfiBreedList { items, len });
        Self::ok(FfiDataTag::BreedList, Box::into_raw(list) as *mut c_void)
    }

    pub(crate) fn ok_image_list(urls: Vec<String>) -> *mut Self {
        let list = Box::new(FfiStringList::from_core(urls));
        Self::ok(FfiDataTag::ImageList, Box::into_raw(list) as *mut c_void)
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (code, http_status) = match &err {
            ApiError::Status { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
            ApiError::Deserialization(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::InvalidBaseUrl(_) => (FfiErrorCode::InvalidBaseUrl, 0),
        };
        Self::error(code, http_status, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, 0, msg.to_string())
    }

    /// # Safety
    /// `result` must come from one of the constructors above and not be
    /// freed twice.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = unsafe { Box::from_raw(result) };
        unsafe { free_c_string(result.error_message) };
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::BreedList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiBreedList) };
                for breed in unsafe { reclaim_slice(list.items, list.len) } {
                    unsafe {
                        free_c_string(breed.name);
                        breed.sub_breeds.free_fields();
                    }
                }
            }
            FfiDataTag::ImageList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiStringList) };
                unsafe { list.free_fields() };
            }
            FfiDataTag::None => {}
        }
    }
}
