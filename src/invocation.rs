//! Loading a VM library and creating a VM in-process.
//!
//! [`JniInvocation`] loads the VM shared library and resolves its three
//! exported entry points. Only one may be live per process. [`JavaVmBuilder`]
//! collects VM options and creates a [`JavaVm`] through it.
//!
//! ```rust,ignore
//! use nativehelper::invocation::JavaVmBuilder;
//! use nativehelper::sys::jni;
//!
//! let vm = JavaVmBuilder::new(jni::JNI_VERSION_1_8)
//!     .option("-Xmx256m")?
//!     .create()?;
//! let env = unsafe { vm.creator_env() };
//! ```

use std::ffi::{CString, NulError, OsString};
use std::path::{Path, PathBuf};
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::env::JniEnv;
use crate::jvm_call;
use crate::sys::jni;

const LOG_TARGET: &str = "JniInvocation";

/// Failure to load a VM library or create a VM.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("a JniInvocation is already live in this process")]
    AlreadyInitialized,

    #[error("invalid option (NUL byte): {0}")]
    Nul(#[from] NulError),

    #[error("failed to load {library}: {source}")]
    Load {
        library: String,
        #[source]
        source: libloading::Error,
    },

    #[error("failed to find symbol {symbol} in {library}: {source}")]
    Symbol {
        symbol: &'static str,
        library: String,
        #[source]
        source: libloading::Error,
    },

    #[error("{0}")]
    Locate(String),

    #[error("JNI error: {0}")]
    Jni(jni::jint),
}

pub type Result<T, E = InvocationError> = std::result::Result<T, E>;

/// File name of the VM library on this platform.
pub fn default_library_name() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "jvm.dll"
    }
    #[cfg(target_os = "macos")]
    {
        "libjvm.dylib"
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        "libjvm.so"
    }
}

/// Places a VM library may live under a `JAVA_HOME`, most likely first.
pub fn candidates_from_java_home(java_home: &Path) -> Vec<PathBuf> {
    let filename = default_library_name();
    let arch = std::env::consts::ARCH;

    let mut rels = vec![
        format!("lib/server/{filename}"),
        format!("jre/lib/server/{filename}"),
        format!("lib/{arch}/server/{filename}"),
        format!("jre/lib/{arch}/server/{filename}"),
    ];

    if cfg!(target_os = "windows") {
        rels.push(format!("bin/server/{filename}"));
        rels.push(format!("jre/bin/server/{filename}"));
        rels.push(format!("bin/client/{filename}"));
        rels.push(format!("jre/bin/client/{filename}"));
    }

    rels.into_iter().map(|r| java_home.join(r)).collect()
}

fn select_library(
    requested: Option<&Path>,
    jvm_lib_path: Option<OsString>,
    java_home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(requested) = requested {
        return Ok(requested.to_path_buf());
    }

    if let Some(path) = jvm_lib_path {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
        return Err(InvocationError::Locate(format!(
            "JVM_LIB_PATH is set but does not exist: {}",
            path.display()
        )));
    }

    if let Some(java_home) = java_home {
        let java_home = PathBuf::from(java_home);
        if let Some(found) = candidates_from_java_home(&java_home).into_iter().find(|p| p.exists()) {
            return Ok(found);
        }
        log::debug!(
            target: LOG_TARGET,
            "no {} under JAVA_HOME={}, falling back to the loader search path",
            default_library_name(),
            java_home.display()
        );
    }

    Ok(PathBuf::from(default_library_name()))
}

static LIVE: AtomicBool = AtomicBool::new(false);

/// A loaded VM library and its invocation entry points.
#[derive(Debug)]
pub struct JniInvocation {
    library_name: PathBuf,
    get_default_java_vm_init_args: jni::JNI_GetDefaultJavaVMInitArgs,
    create_java_vm: jni::JNI_CreateJavaVM,
    get_created_java_vms: jni::JNI_GetCreatedJavaVMs,
    _library: libloading::Library,
}

impl JniInvocation {
    /// Chooses the library to load.
    ///
    /// In order: `requested`, `JVM_LIB_PATH`, the first existing candidate
    /// under `JAVA_HOME`, then the bare platform file name for the dynamic
    /// loader to resolve.
    pub fn get_library(requested: Option<&Path>) -> Result<PathBuf> {
        select_library(requested, std::env::var_os("JVM_LIB_PATH"), std::env::var_os("JAVA_HOME"))
    }

    /// Loads the library chosen by [`get_library`](Self::get_library).
    ///
    /// Fails with `AlreadyInitialized` while another instance is live.
    pub fn init(requested: Option<&Path>) -> Result<Self> {
        if LIVE.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
            return Err(InvocationError::AlreadyInitialized);
        }
        Self::load(requested).inspect_err(|e| {
            log::error!(target: LOG_TARGET, "{e}");
            LIVE.store(false, Ordering::Release);
        })
    }

    fn load(requested: Option<&Path>) -> Result<Self> {
        let library_name = Self::get_library(requested)?;
        let display = library_name.display().to_string();
        log::debug!(target: LOG_TARGET, "loading {display}");

        let library = unsafe { libloading::Library::new(&library_name) }.map_err(|source| InvocationError::Load {
            library: display.clone(),
            source,
        })?;

        let get_default_java_vm_init_args =
            unsafe { find_symbol::<jni::JNI_GetDefaultJavaVMInitArgs>(&library, "JNI_GetDefaultJavaVMInitArgs", &display)? };
        let create_java_vm = unsafe { find_symbol::<jni::JNI_CreateJavaVM>(&library, "JNI_CreateJavaVM", &display)? };
        let get_created_java_vms =
            unsafe { find_symbol::<jni::JNI_GetCreatedJavaVMs>(&library, "JNI_GetCreatedJavaVMs", &display)? };

        Ok(JniInvocation {
            library_name,
            get_default_java_vm_init_args,
            create_java_vm,
            get_created_java_vms,
            _library: library,
        })
    }

    pub fn library_name(&self) -> &Path {
        &self.library_name
    }

    /// # Safety
    ///
    /// `args` must point to a `JavaVMInitArgs` whose `version` is set.
    pub unsafe fn get_default_java_vm_init_args(&self, args: *mut std::ffi::c_void) -> jni::jint {
        (self.get_default_java_vm_init_args)(args)
    }

    /// # Safety
    ///
    /// The out-pointers must be valid and `args` must describe live option
    /// strings.
    pub unsafe fn create_java_vm(
        &self,
        vm: *mut *mut jni::JavaVM,
        env: *mut *mut jni::JNIEnv,
        args: *mut jni::JavaVMInitArgs,
    ) -> jni::jint {
        (self.create_java_vm)(vm, env, args)
    }

    /// Every VM created in this process (at most one in practice).
    pub fn created_java_vms(&self) -> Result<Vec<*mut jni::JavaVM>> {
        let mut count: jni::jsize = 0;
        let res = unsafe { (self.get_created_java_vms)(ptr::null_mut(), 0, &mut count) };
        if res != jni::JNI_OK {
            return Err(InvocationError::Jni(res));
        }
        let mut vms = vec![ptr::null_mut(); count.max(0) as usize];
        let res = unsafe { (self.get_created_java_vms)(vms.as_mut_ptr(), vms.len() as jni::jsize, &mut count) };
        if res != jni::JNI_OK {
            return Err(InvocationError::Jni(res));
        }
        vms.truncate(count.max(0) as usize);
        Ok(vms)
    }
}

impl Drop for JniInvocation {
    fn drop(&mut self) {
        LIVE.store(false, Ordering::Release);
    }
}

unsafe fn find_symbol<T: Copy>(library: &libloading::Library, symbol: &'static str, display: &str) -> Result<T> {
    let name = format!("{symbol}\0");
    library
        .get::<T>(name.as_bytes())
        .map(|sym| *sym)
        .map_err(|source| InvocationError::Symbol {
            symbol,
            library: display.to_string(),
            source,
        })
}

/// Builder for creating an in-process VM.
pub struct JavaVmBuilder {
    version: jni::jint,
    options: Vec<CString>,
    ignore_unrecognized: bool,
}

impl JavaVmBuilder {
    /// A builder for the given JNI version (e.g. `jni::JNI_VERSION_1_8`).
    pub fn new(version: jni::jint) -> Self {
        Self {
            version,
            options: Vec::new(),
            ignore_unrecognized: false,
        }
    }

    /// Adds a VM option like `-Xmx1g` or `-Dkey=value`.
    pub fn option(mut self, opt: &str) -> Result<Self> {
        self.options.push(CString::new(opt)?);
        Ok(self)
    }

    pub fn options<I, S>(mut self, opts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for opt in opts {
            self.options.push(CString::new(opt.as_ref())?);
        }
        Ok(self)
    }

    pub fn ignore_unrecognized(mut self, value: bool) -> Self {
        self.ignore_unrecognized = value;
        self
    }

    /// The options collected so far.
    pub fn option_strings(&self) -> impl Iterator<Item = &str> {
        self.options.iter().filter_map(|o| o.to_str().ok())
    }

    fn build_args(&self) -> (jni::JavaVMInitArgs, Vec<jni::JavaVMOption>) {
        let mut opt_structs: Vec<jni::JavaVMOption> = self
            .options
            .iter()
            .map(|s| jni::JavaVMOption {
                optionString: s.as_ptr() as *mut std::os::raw::c_char,
                extraInfo: ptr::null_mut(),
            })
            .collect();

        let args = jni::JavaVMInitArgs {
            version: self.version,
            nOptions: opt_structs.len() as jni::jint,
            options: if opt_structs.is_empty() {
                ptr::null_mut()
            } else {
                opt_structs.as_mut_ptr()
            },
            ignoreUnrecognized: if self.ignore_unrecognized { jni::JNI_TRUE } else { jni::JNI_FALSE },
        };

        (args, opt_structs)
    }

    /// Creates a VM through a raw `JNI_CreateJavaVM` pointer.
    ///
    /// # Safety
    ///
    /// `create` must be valid and its library must stay loaded for the
    /// lifetime of the returned `JavaVm`.
    pub unsafe fn create_with(self, create: jni::JNI_CreateJavaVM) -> Result<JavaVm> {
        // `args` points into `_opt_structs`, which must outlive the call.
        let (mut args, _opt_structs) = self.build_args();

        let mut vm: *mut jni::JavaVM = ptr::null_mut();
        let mut env: *mut jni::JNIEnv = ptr::null_mut();

        let res = create(&mut vm, &mut env, &mut args);
        if res != jni::JNI_OK {
            return Err(InvocationError::Jni(res));
        }
        if vm.is_null() || env.is_null() {
            return Err(InvocationError::Jni(jni::JNI_ERR));
        }

        Ok(JavaVm {
            vm,
            creator_env: env,
            destroyed: false,
            invocation: None,
        })
    }

    /// Creates a VM with an already loaded library, which the VM keeps.
    pub fn create_with_invocation(self, invocation: JniInvocation) -> Result<JavaVm> {
        let mut vm = unsafe { self.create_with(invocation.create_java_vm)? };
        vm.invocation = Some(invocation);
        Ok(vm)
    }

    /// Creates a VM from the library at `path`.
    pub fn create_from_library<P: AsRef<Path>>(self, path: P) -> Result<JavaVm> {
        let invocation = JniInvocation::init(Some(path.as_ref()))?;
        self.create_with_invocation(invocation)
    }

    /// Creates a VM from the library [`JniInvocation::get_library`] selects.
    pub fn create(self) -> Result<JavaVm> {
        let invocation = JniInvocation::init(None)?;
        self.create_with_invocation(invocation)
    }
}

/// An in-process VM. Destroyed on drop unless [`destroy`](Self::destroy) ran.
///
/// The creator environment is only valid on the thread that created the VM.
#[derive(Debug)]
pub struct JavaVm {
    vm: *mut jni::JavaVM,
    creator_env: *mut jni::JNIEnv,
    destroyed: bool,
    invocation: Option<JniInvocation>,
}

impl JavaVm {
    pub fn java_vm_ptr(&self) -> *mut jni::JavaVM {
        self.vm
    }

    pub fn creator_env_ptr(&self) -> *mut jni::JNIEnv {
        self.creator_env
    }

    /// # Safety
    ///
    /// Only valid on the thread that created the VM.
    pub unsafe fn creator_env(&self) -> JniEnv {
        JniEnv::from_raw(self.creator_env)
    }

    /// The environment of the current thread, if it is attached.
    pub fn get_env(&self, version: jni::jint) -> Result<JniEnv> {
        let mut env_ptr: *mut std::ffi::c_void = ptr::null_mut();
        let res = unsafe { jvm_call!(self.vm, GetEnv, &mut env_ptr, version) };
        if res != jni::JNI_OK || env_ptr.is_null() {
            return Err(InvocationError::Jni(res));
        }
        Ok(unsafe { JniEnv::from_raw(env_ptr as *mut jni::JNIEnv) })
    }

    /// Attaches the current thread and returns its environment.
    pub fn attach_current_thread(&self) -> Result<JniEnv> {
        let mut env_ptr: *mut std::ffi::c_void = ptr::null_mut();
        let res = unsafe { jvm_call!(self.vm, AttachCurrentThread, &mut env_ptr, ptr::null_mut()) };
        if res != jni::JNI_OK || env_ptr.is_null() {
            return Err(InvocationError::Jni(res));
        }
        Ok(unsafe { JniEnv::from_raw(env_ptr as *mut jni::JNIEnv) })
    }

    pub fn detach_current_thread(&self) -> Result<()> {
        let res = unsafe { jvm_call!(self.vm, DetachCurrentThread) };
        if res != jni::JNI_OK {
            return Err(InvocationError::Jni(res));
        }
        Ok(())
    }

    /// Shuts the VM down, reporting the runtime's status.
    pub fn destroy(mut self) -> Result<()> {
        self.destroyed = true;
        let res = unsafe { jvm_call!(self.vm, DestroyJavaVM) };
        if res != jni::JNI_OK {
            return Err(InvocationError::Jni(res));
        }
        Ok(())
    }

    /// The loaded library, when the VM was created through one.
    pub fn invocation(&self) -> Option<&JniInvocation> {
        self.invocation.as_ref()
    }
}

impl Drop for JavaVm {
    fn drop(&mut self) {
        if self.destroyed || self.vm.is_null() {
            return;
        }
        unsafe {
            let _ = jvm_call!(self.vm, DestroyJavaVM);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_request_wins() {
        let path = select_library(Some(Path::new("/opt/vm/libjvm.so")), Some("/nope".into()), None).unwrap();
        assert_eq!(path, PathBuf::from("/opt/vm/libjvm.so"));
    }

    #[test]
    fn missing_jvm_lib_path_is_an_error() {
        let err = select_library(None, Some("/definitely/not/here/libjvm.so".into()), None).unwrap_err();
        assert!(matches!(err, InvocationError::Locate(_)));
    }

    #[test]
    fn existing_jvm_lib_path_is_used() {
        let exe = std::env::current_exe().unwrap();
        let path = select_library(None, Some(exe.clone().into_os_string()), Some("/ignored".into())).unwrap();
        assert_eq!(path, exe);
    }

    #[test]
    fn java_home_without_library_falls_back_to_default_name() {
        let home = std::env::temp_dir();
        let path = select_library(None, None, Some(home.into_os_string())).unwrap();
        assert_eq!(path, PathBuf::from(default_library_name()));
    }

    #[test]
    fn nothing_configured_uses_default_name() {
        let path = select_library(None, None, None).unwrap();
        assert_eq!(path, PathBuf::from(default_library_name()));
    }

    #[test]
    fn candidates_cover_server_layouts() {
        let candidates = candidates_from_java_home(Path::new("/jdk"));
        assert_eq!(
            candidates[0],
            PathBuf::from(format!("/jdk/lib/server/{}", default_library_name()))
        );
        assert!(candidates.len() >= 4);
    }
}
