//! JNI method descriptors checked against native function types.
//!
//! A descriptor such as `(ILjava/lang/String;)[B` names the Java types of a
//! native method. The native function implementing it has Rust types
//! (`*mut JNIEnv, JClass, jint, JString) -> JByteArray`). This module parses
//! descriptors and compares them to function types, entirely in `const fn`,
//! so the `native_method!` family can reject a mismatch at compile time.
//!
//! Each Rust type that may appear in a native signature implements
//! [`JniType`]:
//!
//! | type | descriptor | kind | finality | position |
//! |---|---|---|---|---|
//! | `jboolean`..`jdouble` | `Z B C S I J F D` | Critical | Final | SecondOrLater |
//! | `JObject` | `Ljava/lang/Object;` | Fast | NotFinal | FirstOrLater |
//! | `JClass` | `Ljava/lang/Class;` | Fast | Final | FirstOrLater |
//! | `JString` | `Ljava/lang/String;` | Fast | Final | SecondOrLater |
//! | `JArray` | `Ljava/lang/Object;` | Fast | NotFinal | SecondOrLater |
//! | `JObjectArray` | `[Ljava/lang/Object;` | Fast | NotFinal | SecondOrLater |
//! | `J{Prim}Array` | `[Z [B [C [S [I [J [F [D` | Fast | Final | SecondOrLater |
//! | `JThrowable` | `Ljava/lang/Throwable;` | Fast | NotFinal | SecondOrLater |
//! | `*mut JNIEnv` | | NormalJniCallingConventionParameter | Final | Zeroth |
//! | `()` | `V` | Critical | Final | Return |
//!
//! Comparison is strict for final types: `I` must be `jint`,
//! `Ljava/lang/String;` must be `JString`. Any other object descriptor maps
//! to `JObject` and any reference array to `JObjectArray`. `JThrowable`
//! accepts any object descriptor and `JArray` any array descriptor.

use std::fmt;

use thiserror::Error;

use crate::sys::jni;
use crate::types::{
    JArray, JBooleanArray, JByteArray, JCharArray, JClass, JDoubleArray, JFloatArray, JIntArray, JLongArray,
    JObject, JObjectArray, JShortArray, JString, JThrowable,
};

/// Most parameters a method descriptor may declare.
pub const MAX_PARAMS: usize = 255;

/// Calling convention of a native method, and the least restrictive
/// convention a type may appear in.
///
/// Ordered: a type of kind `k` is usable in natives of kind `k` or lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NativeKind {
    /// Only `JNIEnv*`: part of the calling convention, never in a descriptor.
    NormalJniCallingConventionParameter,
    Normal,
    /// `@FastNative`: same parameters as a normal native.
    Fast,
    /// `@CriticalNative`: no `JNIEnv*`, no receiver, primitives only.
    Critical,
}

/// Where a type may appear in a native function's signature.
///
/// Positions count from the `JNIEnv*` parameter. Ignored for critical natives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativePosition {
    Return,
    Zeroth,
    FirstOrLater,
    SecondOrLater,
}

/// Whether a type names exactly one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFinality {
    Final,
    NotFinal,
}

/// Static description of one native parameter or return type.
#[derive(Debug, Clone, Copy)]
pub struct JniTypeInfo {
    pub name: &'static str,
    /// Empty for `JNIEnv*`.
    pub descriptor: &'static str,
    pub kind: NativeKind,
    pub finality: TypeFinality,
    pub position: NativePosition,
}

impl JniTypeInfo {
    const fn is(&self, other: &JniTypeInfo) -> bool {
        bytes_eq(self.name.as_bytes(), other.name.as_bytes())
    }

    const fn is_final(&self) -> bool {
        matches!(self.finality, TypeFinality::Final)
    }
}

/// A Rust type usable in a native function signature.
pub trait JniType {
    const INFO: JniTypeInfo;
}

macro_rules! jni_types {
    ($($ty:ty => $name:literal, $descriptor:literal, $kind:ident, $finality:ident, $position:ident;)*) => {
        $(
            impl JniType for $ty {
                const INFO: JniTypeInfo = JniTypeInfo {
                    name: $name,
                    descriptor: $descriptor,
                    kind: NativeKind::$kind,
                    finality: TypeFinality::$finality,
                    position: NativePosition::$position,
                };
            }
        )*

        /// Every known type, in lookup order.
        const KNOWN_TYPES: &[JniTypeInfo] = &[$(<$ty as JniType>::INFO),*];
    };
}

jni_types! {
    jni::jboolean => "jboolean", "Z", Critical, Final, SecondOrLater;
    jni::jbyte => "jbyte", "B", Critical, Final, SecondOrLater;
    jni::jchar => "jchar", "C", Critical, Final, SecondOrLater;
    jni::jshort => "jshort", "S", Critical, Final, SecondOrLater;
    jni::jint => "jint", "I", Critical, Final, SecondOrLater;
    jni::jlong => "jlong", "J", Critical, Final, SecondOrLater;
    jni::jfloat => "jfloat", "F", Critical, Final, SecondOrLater;
    jni::jdouble => "jdouble", "D", Critical, Final, SecondOrLater;
    JObject => "JObject", "Ljava/lang/Object;", Fast, NotFinal, FirstOrLater;
    JClass => "JClass", "Ljava/lang/Class;", Fast, Final, FirstOrLater;
    JString => "JString", "Ljava/lang/String;", Fast, Final, SecondOrLater;
    JArray => "JArray", "Ljava/lang/Object;", Fast, NotFinal, SecondOrLater;
    JObjectArray => "JObjectArray", "[Ljava/lang/Object;", Fast, NotFinal, SecondOrLater;
    JBooleanArray => "JBooleanArray", "[Z", Fast, Final, SecondOrLater;
    JByteArray => "JByteArray", "[B", Fast, Final, SecondOrLater;
    JCharArray => "JCharArray", "[C", Fast, Final, SecondOrLater;
    JShortArray => "JShortArray", "[S", Fast, Final, SecondOrLater;
    JIntArray => "JIntArray", "[I", Fast, Final, SecondOrLater;
    JLongArray => "JLongArray", "[J", Fast, Final, SecondOrLater;
    JFloatArray => "JFloatArray", "[F", Fast, Final, SecondOrLater;
    JDoubleArray => "JDoubleArray", "[D", Fast, Final, SecondOrLater;
    JThrowable => "JThrowable", "Ljava/lang/Throwable;", Fast, NotFinal, SecondOrLater;
    *mut jni::JNIEnv => "*mut JNIEnv", "", NormalJniCallingConventionParameter, Final, Zeroth;
    () => "()", "V", Critical, Final, Return;
}

/// A native function pointer type whose parameter and return types are all
/// [`JniType`]s.
///
/// Implemented for `extern "system" fn` and `unsafe extern "system" fn`
/// pointers of up to 16 parameters.
pub trait JniFunction {
    const RETURN: JniTypeInfo;
    const PARAMS: &'static [JniTypeInfo];
}

macro_rules! impl_jni_function {
    ($($arg:ident),*) => {
        impl<R: JniType, $($arg: JniType),*> JniFunction for extern "system" fn($($arg),*) -> R {
            const RETURN: JniTypeInfo = R::INFO;
            const PARAMS: &'static [JniTypeInfo] = &[$($arg::INFO),*];
        }

        impl<R: JniType, $($arg: JniType),*> JniFunction for unsafe extern "system" fn($($arg),*) -> R {
            const RETURN: JniTypeInfo = R::INFO;
            const PARAMS: &'static [JniTypeInfo] = &[$($arg::INFO),*];
        }
    };
}

impl_jni_function!();
impl_jni_function!(A0);
impl_jni_function!(A0, A1);
impl_jni_function!(A0, A1, A2);
impl_jni_function!(A0, A1, A2, A3);
impl_jni_function!(A0, A1, A2, A3, A4);
impl_jni_function!(A0, A1, A2, A3, A4, A5);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6, A7);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6, A7, A8);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13, A14);
impl_jni_function!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13, A14, A15);

/// Why a descriptor was rejected or did not match a function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Cannot have an empty signature")]
    EmptySignature,
    #[error("First character of a JNI signature must be a '('")]
    MissingOpenParen,
    #[error("Signature was missing ')'")]
    MissingCloseParen,
    #[error("Missing return type")]
    MissingReturnType,
    #[error("Signature had left over tokens after parsing return type")]
    TrailingTokens,
    #[error("Type descriptor ended unexpectedly")]
    UnexpectedEnd,
    #[error("Void type descriptor only allowed in return type")]
    VoidNotAllowed,
    #[error("The '!' fast JNI prefix is deprecated")]
    FastJniPrefix,
    #[error("Expected a valid type descriptor character")]
    InvalidTypeCharacter,
    #[error("All array types must be followed by their component type (e.g. '[I', '[[Z')")]
    ArrayMissingComponent,
    #[error("Object type descriptor is missing its terminating ';'")]
    UnterminatedClassName,
    #[error("Object type descriptor has an empty class name")]
    EmptyClassName,
    #[error("Signature has more than 255 parameters")]
    TooManyParameters,
    #[error("The function signature has one or more types incompatible with JNI")]
    InvalidFunctionType,
    #[error("Number of parameters in JNI descriptor string did not match number of parameters in the function type")]
    ParameterCountMismatch,
    #[error("Could not find any JNI type corresponding to the type descriptor")]
    UnknownDescriptor,
    #[error("JThrowable must correspond to an object type descriptor")]
    ThrowableMismatch,
    #[error("JArray must correspond to an array type descriptor")]
    ArrayMismatch,
    #[error("The JNI descriptor string must be the exact type equivalent of the function type")]
    FinalTypeMismatch,
    #[error("The array JNI descriptor must correspond to J<Type>Array or JArray")]
    ArrayTypeMismatch,
    #[error("The object JNI descriptor must correspond to JObject")]
    ObjectTypeMismatch,
    #[error("Bad return type. Only unambiguous (final) types can be used to infer a signature")]
    NonFinalReturnType,
    #[error("Bad parameter type. Only unambiguous (final) types can be used to infer a signature")]
    NonFinalParameterType,
}

// =============================================================================
// Descriptor parsing
// =============================================================================

/// One type descriptor inside a larger string: `bytes[start..start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeToken {
    pub start: usize,
    pub len: usize,
}

impl TypeToken {
    const EMPTY: TypeToken = TypeToken { start: 0, len: 0 };

    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Parses the single type descriptor starting at `bytes[start]`.
///
/// `V` is accepted only when `allow_void` is set, and never as an array
/// component.
pub const fn parse_type_descriptor(bytes: &[u8], start: usize, allow_void: bool) -> Result<TypeToken, SignatureError> {
    if start >= bytes.len() {
        return Err(SignatureError::UnexpectedEnd);
    }

    let mut i = start;
    while i < bytes.len() && bytes[i] == b'[' {
        i += 1;
    }
    if i == bytes.len() {
        return Err(SignatureError::ArrayMissingComponent);
    }
    let is_array = i > start;

    let end = match bytes[i] {
        b'!' => return Err(SignatureError::FastJniPrefix),
        b'V' => {
            if !allow_void || is_array {
                return Err(SignatureError::VoidNotAllowed);
            }
            i + 1
        }
        b'Z' | b'B' | b'C' | b'S' | b'I' | b'J' | b'F' | b'D' => i + 1,
        b'L' => {
            // Class names are not validated; scan to the next ';'.
            let mut semicolon = i + 1;
            while semicolon < bytes.len() && bytes[semicolon] != b';' {
                semicolon += 1;
            }
            if semicolon == bytes.len() {
                return Err(SignatureError::UnterminatedClassName);
            }
            if semicolon == i + 1 {
                return Err(SignatureError::EmptyClassName);
            }
            semicolon + 1
        }
        _ => return Err(SignatureError::InvalidTypeCharacter),
    };

    Ok(TypeToken { start, len: end - start })
}

/// A parsed `(params)ret` descriptor borrowing its tokens from the input.
#[derive(Clone, Copy)]
pub struct MethodDescriptor<'a> {
    source: &'a str,
    params: [TypeToken; MAX_PARAMS],
    param_count: usize,
    ret: TypeToken,
}

#[derive(Clone, Copy)]
enum ParseState {
    Initial,
    Parameters,
    ReturnType,
    Completed,
}

/// Parses a method descriptor such as `(I[Ljava/lang/String;)V`.
pub const fn parse_method_descriptor(descriptor: &str) -> Result<MethodDescriptor<'_>, SignatureError> {
    let bytes = descriptor.as_bytes();
    let mut params = [TypeToken::EMPTY; MAX_PARAMS];
    let mut param_count = 0;
    let mut ret = TypeToken::EMPTY;
    let mut state = ParseState::Initial;
    let mut i = 0;

    while i < bytes.len() {
        match state {
            ParseState::Initial => {
                if bytes[i] != b'(' {
                    return Err(SignatureError::MissingOpenParen);
                }
                state = ParseState::Parameters;
                i += 1;
            }
            ParseState::Parameters => {
                if bytes[i] == b')' {
                    state = ParseState::ReturnType;
                    i += 1;
                } else {
                    let token = match parse_type_descriptor(bytes, i, false) {
                        Ok(token) => token,
                        Err(e) => return Err(e),
                    };
                    if param_count == MAX_PARAMS {
                        return Err(SignatureError::TooManyParameters);
                    }
                    params[param_count] = token;
                    param_count += 1;
                    i = token.end();
                }
            }
            ParseState::ReturnType => {
                ret = match parse_type_descriptor(bytes, i, true) {
                    Ok(token) => token,
                    Err(e) => return Err(e),
                };
                state = ParseState::Completed;
                i = ret.end();
            }
            // "()VI": V ends the descriptor.
            ParseState::Completed => return Err(SignatureError::TrailingTokens),
        }
    }

    match state {
        ParseState::Completed => Ok(MethodDescriptor { source: descriptor, params, param_count, ret }),
        ParseState::Parameters => Err(SignatureError::MissingCloseParen),
        ParseState::ReturnType => Err(SignatureError::MissingReturnType),
        ParseState::Initial => Err(SignatureError::EmptySignature),
    }
}

impl<'a> MethodDescriptor<'a> {
    pub const fn param_count(&self) -> usize {
        self.param_count
    }

    pub const fn param_bytes(&self, index: usize) -> &'a [u8] {
        token_bytes(self.source.as_bytes(), self.params[index])
    }

    pub const fn return_bytes(&self) -> &'a [u8] {
        token_bytes(self.source.as_bytes(), self.ret)
    }

    pub fn param(&self, index: usize) -> &'a str {
        let token = self.params[..self.param_count][index];
        &self.source[token.start..token.end()]
    }

    pub fn params(&self) -> impl Iterator<Item = &'a str> + '_ {
        (0..self.param_count).map(move |i| self.param(i))
    }

    pub fn return_type(&self) -> &'a str {
        &self.source[self.ret.start..self.ret.end()]
    }
}

impl fmt::Debug for MethodDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("params", &self.params().collect::<Vec<_>>())
            .field("ret", &self.return_type())
            .finish()
    }
}

const fn token_bytes(bytes: &[u8], token: TypeToken) -> &[u8] {
    let (_, rest) = bytes.split_at(token.start);
    let (token_bytes, _) = rest.split_at(token.len);
    token_bytes
}

const fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

// =============================================================================
// Function type validation
// =============================================================================

const fn position_of(index: usize) -> NativePosition {
    match index {
        0 => NativePosition::Zeroth,
        1 => NativePosition::FirstOrLater,
        _ => NativePosition::SecondOrLater,
    }
}

const fn is_critical(kind: NativeKind) -> bool {
    matches!(kind, NativeKind::Critical)
}

/// Whether `info` may appear at `position` of a native of `kind`.
pub const fn is_valid_parameter(info: &JniTypeInfo, kind: NativeKind, position: NativePosition) -> bool {
    // Critical natives have no JNIEnv*/receiver prefix, so positions don't apply.
    if !is_critical(kind) {
        if matches!(info.position, NativePosition::Return) {
            if !matches!(position, NativePosition::Return) {
                return false;
            }
        } else {
            let allowed = match position {
                NativePosition::Zeroth => matches!(info.position, NativePosition::Zeroth),
                NativePosition::FirstOrLater => matches!(info.position, NativePosition::FirstOrLater),
                NativePosition::SecondOrLater | NativePosition::Return => matches!(
                    info.position,
                    NativePosition::FirstOrLater | NativePosition::SecondOrLater
                ),
            };
            if !allowed {
                return false;
            }
        }
    }

    match info.kind {
        NativeKind::NormalJniCallingConventionParameter => !is_critical(kind),
        NativeKind::Critical => true,
        _ => !is_critical(kind),
    }
}

const fn is_parameter_count_valid(kind: NativeKind, count: usize) -> bool {
    match kind {
        NativeKind::Normal | NativeKind::Fast => count >= 2,
        NativeKind::Critical => true,
        NativeKind::NormalJniCallingConventionParameter => false,
    }
}

/// Checks that `ret` and `params` form a valid native function of `kind`.
pub const fn validate_function_type(
    kind: NativeKind,
    ret: &JniTypeInfo,
    params: &[JniTypeInfo],
) -> Result<(), SignatureError> {
    if !is_parameter_count_valid(kind, params.len()) || !is_valid_parameter(ret, kind, NativePosition::Return) {
        return Err(SignatureError::InvalidFunctionType);
    }
    let mut i = 0;
    while i < params.len() {
        if !is_valid_parameter(&params[i], kind, position_of(i)) {
            return Err(SignatureError::InvalidFunctionType);
        }
        i += 1;
    }
    Ok(())
}

/// Leading parameters that are not part of the descriptor:
/// `JNIEnv*` and the receiver for normal and fast natives.
pub const fn descriptor_prefix_len(kind: NativeKind) -> usize {
    if is_critical(kind) {
        0
    } else {
        2
    }
}

// =============================================================================
// Descriptor comparison
// =============================================================================

/// The type a descriptor token corresponds to, if any.
///
/// Exact descriptor matches win, in table order. Otherwise any object maps to
/// `JObject` and any reference array to `JObjectArray`.
pub const fn most_similar_type(token: &[u8]) -> Option<JniTypeInfo> {
    let mut i = 0;
    while i < KNOWN_TYPES.len() {
        let candidate = KNOWN_TYPES[i];
        if candidate.kind as u8 >= NativeKind::Normal as u8 && bytes_eq(token, candidate.descriptor.as_bytes()) {
            return Some(candidate);
        }
        i += 1;
    }

    if !token.is_empty() && token[0] == b'L' {
        return Some(<JObject as JniType>::INFO);
    }
    if token.len() >= 2 && token[0] == b'[' && (token[1] == b'[' || token[1] == b'L') {
        // Reference arrays are covariant, so any T[] is castable to Object[].
        return Some(<JObjectArray as JniType>::INFO);
    }
    None
}

const fn compare_descriptor_token(token: &[u8], derived: &JniTypeInfo) -> Result<(), SignatureError> {
    let user = match most_similar_type(token) {
        Some(user) => user,
        None => return Err(SignatureError::UnknownDescriptor),
    };
    let shorty = if token.is_empty() { 0 } else { token[0] };

    if user.is(derived) {
        return Ok(());
    }
    if derived.is(&<JThrowable as JniType>::INFO) {
        return if shorty == b'L' { Ok(()) } else { Err(SignatureError::ThrowableMismatch) };
    }
    if derived.is(&<JArray as JniType>::INFO) {
        return if shorty == b'[' { Ok(()) } else { Err(SignatureError::ArrayMismatch) };
    }

    if derived.is_final() || user.is_final() {
        Err(SignatureError::FinalTypeMismatch)
    } else if shorty == b'[' {
        Err(SignatureError::ArrayTypeMismatch)
    } else if shorty == b'L' {
        Err(SignatureError::ObjectTypeMismatch)
    } else {
        Err(SignatureError::FinalTypeMismatch)
    }
}

/// Checks `descriptor` against a native function of `kind` with the given
/// return and parameter types (including the `JNIEnv*`/receiver prefix).
pub const fn check_function_descriptor(
    kind: NativeKind,
    descriptor: &str,
    ret: JniTypeInfo,
    params: &[JniTypeInfo],
) -> Result<(), SignatureError> {
    if let Err(e) = validate_function_type(kind, &ret, params) {
        return Err(e);
    }
    let parsed = match parse_method_descriptor(descriptor) {
        Ok(parsed) => parsed,
        Err(e) => return Err(e),
    };

    let prefix = descriptor_prefix_len(kind);
    if parsed.param_count() != params.len() - prefix {
        return Err(SignatureError::ParameterCountMismatch);
    }
    if let Err(e) = compare_descriptor_token(parsed.return_bytes(), &ret) {
        return Err(e);
    }
    let mut i = 0;
    while i < parsed.param_count() {
        if let Err(e) = compare_descriptor_token(parsed.param_bytes(i), &params[prefix + i]) {
            return Err(e);
        }
        i += 1;
    }
    Ok(())
}

/// [`check_function_descriptor`] for a function pointer type.
///
/// ```rust,ignore
/// type Dup = extern "system" fn(*mut jni::JNIEnv, JClass, jni::jint) -> jni::jint;
/// assert!(signature::check::<Dup>(NativeKind::Normal, "(I)I").is_ok());
/// ```
pub const fn check<F: JniFunction>(kind: NativeKind, descriptor: &str) -> Result<(), SignatureError> {
    check_function_descriptor(kind, descriptor, F::RETURN, F::PARAMS)
}

// =============================================================================
// Descriptor inference
// =============================================================================

/// Checks that a descriptor can be inferred: the function type is valid and
/// every type past the prefix is final.
pub const fn check_inferable(kind: NativeKind, ret: JniTypeInfo, params: &[JniTypeInfo]) -> Result<(), SignatureError> {
    if let Err(e) = validate_function_type(kind, &ret, params) {
        return Err(e);
    }
    if !ret.is_final() {
        return Err(SignatureError::NonFinalReturnType);
    }
    let mut i = descriptor_prefix_len(kind);
    while i < params.len() {
        if !params[i].is_final() {
            return Err(SignatureError::NonFinalParameterType);
        }
        i += 1;
    }
    Ok(())
}

/// Length in bytes of the inferred descriptor, without a terminator.
pub const fn inferred_descriptor_len(kind: NativeKind, ret: JniTypeInfo, params: &[JniTypeInfo]) -> usize {
    let mut len = 2 + ret.descriptor.len();
    let mut i = descriptor_prefix_len(kind);
    while i < params.len() {
        len += params[i].descriptor.len();
        i += 1;
    }
    len
}

/// Writes the inferred descriptor into a NUL-terminated array.
///
/// `N` must be `inferred_descriptor_len(..) + 1`; shorter arrays get a
/// truncated descriptor.
pub const fn write_inferred_descriptor<const N: usize>(
    kind: NativeKind,
    ret: JniTypeInfo,
    params: &[JniTypeInfo],
) -> [u8; N] {
    let mut out = [0u8; N];
    if N == 0 {
        return out;
    }
    let limit = N - 1;
    let mut pos = 0;

    if pos < limit {
        out[pos] = b'(';
        pos += 1;
    }
    let mut i = descriptor_prefix_len(kind);
    while i < params.len() {
        let bytes = params[i].descriptor.as_bytes();
        let mut j = 0;
        while j < bytes.len() && pos < limit {
            out[pos] = bytes[j];
            pos += 1;
            j += 1;
        }
        i += 1;
    }
    if pos < limit {
        out[pos] = b')';
        pos += 1;
    }
    let bytes = ret.descriptor.as_bytes();
    let mut j = 0;
    while j < bytes.len() && pos < limit {
        out[pos] = bytes[j];
        pos += 1;
        j += 1;
    }
    out
}

/// The descriptor implied by a function type whose types are all final.
pub fn infer_function_descriptor(
    kind: NativeKind,
    ret: JniTypeInfo,
    params: &[JniTypeInfo],
) -> Result<String, SignatureError> {
    check_inferable(kind, ret, params)?;
    let mut descriptor = String::with_capacity(inferred_descriptor_len(kind, ret, params));
    descriptor.push('(');
    for param in &params[descriptor_prefix_len(kind)..] {
        descriptor.push_str(param.descriptor);
    }
    descriptor.push(')');
    descriptor.push_str(ret.descriptor);
    Ok(descriptor)
}

/// [`infer_function_descriptor`] for a function pointer type.
pub fn infer<F: JniFunction>(kind: NativeKind) -> Result<String, SignatureError> {
    infer_function_descriptor(kind, F::RETURN, F::PARAMS)
}

/// Copies `s` into a NUL-terminated array of length `N` (normally `s.len() + 1`).
#[doc(hidden)]
pub const fn nul_terminated<const N: usize>(s: &str) -> [u8; N] {
    let bytes = s.as_bytes();
    let mut out = [0u8; N];
    let mut i = 0;
    while i < bytes.len() && i + 1 < N {
        out[i] = bytes[i];
        i += 1;
    }
    out
}
