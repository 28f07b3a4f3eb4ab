//! The heap: allocation, binding lookup/assignment, and the collection
//! cycle's entry point.
//!
//! Every heap creation bumps `bytes_allocated` by the payload's
//! `size_hint` and checks the threshold before returning — mirroring
//! the teacher's own allocate-then-maybe-collect shape, just without a
//! concurrent allocator to coordinate with.

use crate::config::GcConfig;
use crate::error::{AssignError, GcError};
use crate::marker;
use crate::object::{ArrayHandle, EnvHandle, ObjectHandle, Slab, StringHandle};
use crate::stats::GcStats;
use crate::value::{Binding, BindingKind, JSArray, JSEnv, JSObject, JSString, Value};
use vela_util::Symbol;

pub struct Heap {
    strings: Slab<JSString>,
    objects: Slab<JSObject>,
    arrays: Slab<JSArray>,
    envs: Slab<JSEnv>,

    bytes_allocated: usize,
    threshold: usize,
    config: GcConfig,
    stats: GcStats,

    /// The environment the evaluator is currently executing in. Walking
    /// its `parent` chain reaches every live scope up to the global
    /// environment — the root set's first half (see the GC section of
    /// the design notes on why this supersedes the teacher's
    /// global-plus-current-frame-only approximation).
    current_env: Option<EnvHandle>,

    /// Values the evaluator is holding across a sub-evaluation that
    /// could itself allocate and trigger a collection — e.g. array
    /// elements already evaluated but not yet written into the array
    /// being built. The root set's second half.
    value_roots: Vec<Value>,
}

impl Heap {
    pub fn new(config: GcConfig) -> Self {
        let threshold = config.initial_threshold;
        Self {
            strings: Slab::new(),
            objects: Slab::new(),
            arrays: Slab::new(),
            envs: Slab::new(),
            bytes_allocated: 0,
            threshold,
            config,
            stats: GcStats::default(),
            current_env: None,
            value_roots: Vec::new(),
        }
    }

    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    pub fn stats(&self) -> &GcStats {
        &self.stats
    }

    pub fn bytes_allocated(&self) -> usize {
        self.bytes_allocated
    }

    // --- Root bookkeeping -------------------------------------------------

    /// Switches the environment marking walks from, returning the
    /// previous one so the caller can restore it on the way back out
    /// (function calls and block scopes both do this around the body
    /// they evaluate).
    pub fn set_current_env(&mut self, env: EnvHandle) -> Option<EnvHandle> {
        self.current_env.replace(env)
    }

    pub fn restore_current_env(&mut self, previous: Option<EnvHandle>) {
        self.current_env = previous;
    }

    pub fn current_env(&self) -> Option<EnvHandle> {
        self.current_env
    }

    pub fn push_value_root(&mut self, value: Value) {
        self.value_roots.push(value);
    }

    pub fn pop_value_root(&mut self) {
        self.value_roots.pop();
    }

    // --- Allocation ---------------------------------------------------

    pub fn alloc_string(&mut self, value: impl Into<Box<str>>) -> StringHandle {
        let boxed = value.into();
        let size = boxed.len().max(1);
        let index = self.strings.insert(JSString(boxed), size);
        self.after_alloc(size);
        StringHandle(index)
    }

    pub fn alloc_object(&mut self, object: JSObject) -> ObjectHandle {
        let size = std::mem::size_of::<Value>() * object.0.len().max(1);
        let index = self.objects.insert(object, size);
        self.after_alloc(size);
        ObjectHandle(index)
    }

    pub fn alloc_array(&mut self, array: JSArray) -> ArrayHandle {
        let size = std::mem::size_of::<Value>() * array.0.len().max(1);
        let index = self.arrays.insert(array, size);
        self.after_alloc(size);
        ArrayHandle(index)
    }

    pub fn alloc_env(&mut self, parent: Option<EnvHandle>, is_function_boundary: bool) -> EnvHandle {
        let env = JSEnv::new(parent, is_function_boundary);
        let index = self.envs.insert(env, 64);
        self.after_alloc(64);
        EnvHandle(index)
    }

    fn after_alloc(&mut self, size: usize) {
        self.bytes_allocated += size;
        if self.bytes_allocated > self.threshold {
            self.collect();
        }
    }

    // --- Accessors ------------------------------------------------------

    pub fn string(&self, handle: StringHandle) -> Option<&JSString> {
        self.strings.get(handle.0).map(|s| &s.payload)
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&JSObject> {
        self.objects.get(handle.0).map(|s| &s.payload)
    }

    pub fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut JSObject> {
        self.objects.get_mut(handle.0).map(|s| &mut s.payload)
    }

    pub fn array(&self, handle: ArrayHandle) -> Option<&JSArray> {
        self.arrays.get(handle.0).map(|s| &s.payload)
    }

    pub fn array_mut(&mut self, handle: ArrayHandle) -> Option<&mut JSArray> {
        self.arrays.get_mut(handle.0).map(|s| &mut s.payload)
    }

    pub fn env(&self, handle: EnvHandle) -> Option<&JSEnv> {
        self.envs.get(handle.0).map(|s| &s.payload)
    }

    /// Like [`Heap::string`], but for callers at an API boundary (host
    /// natives, the `toString`-style stringifier) that should hard-fail
    /// on a bad handle rather than treat it as absent data.
    pub fn string_checked(&self, handle: StringHandle) -> Result<&JSString, GcError> {
        self.string(handle).ok_or(GcError::HandleNotFound)
    }

    pub fn object_checked(&self, handle: ObjectHandle) -> Result<&JSObject, GcError> {
        self.object(handle).ok_or(GcError::HandleNotFound)
    }

    pub fn array_checked(&self, handle: ArrayHandle) -> Result<&JSArray, GcError> {
        self.array(handle).ok_or(GcError::HandleNotFound)
    }

    pub(crate) fn env_slab(&self) -> &Slab<JSEnv> {
        &self.envs
    }

    pub(crate) fn object_slab(&self) -> &Slab<JSObject> {
        &self.objects
    }

    pub(crate) fn array_slab(&self) -> &Slab<JSArray> {
        &self.arrays
    }

    pub(crate) fn string_slab(&self) -> &Slab<JSString> {
        &self.strings
    }

    // --- Environment bindings -------------------------------------------

    /// `let`/`const` bind in `env` directly; `var` hoists to the
    /// nearest enclosing function boundary (the global environment
    /// counts as one), per standard JS `var` scoping.
    pub fn define(&mut self, env: EnvHandle, name: Symbol, value: Value, kind: BindingKind) {
        let target = if kind == BindingKind::Var {
            self.function_scope_of(env)
        } else {
            env
        };
        if let Some(slot) = self.envs.get_mut(target.0) {
            slot.payload.bindings.insert(name, Binding { value, kind });
        }
    }

    fn function_scope_of(&self, env: EnvHandle) -> EnvHandle {
        let mut current = env;
        loop {
            match self.env(current) {
                Some(frame) if frame.is_function_boundary => return current,
                Some(frame) => match frame.parent {
                    Some(parent) => current = parent,
                    None => return current,
                },
                None => return current,
            }
        }
    }

    /// Walks `env`'s parent chain looking for `name`.
    pub fn lookup(&self, env: EnvHandle, name: Symbol) -> Option<Value> {
        let mut current = Some(env);
        while let Some(handle) = current {
            let frame = self.env(handle)?;
            if let Some(binding) = frame.bindings.get(&name) {
                return Some(binding.value.clone());
            }
            current = frame.parent;
        }
        None
    }

    /// Writes `value` into the frame that defines `name`, enforcing
    /// `const`. Returns [`AssignError::NotFound`] if `name` is unbound
    /// anywhere in the chain, [`AssignError::Const`] if its defining
    /// frame marked it `const`.
    pub fn assign(&mut self, env: EnvHandle, name: Symbol, value: Value) -> Result<(), AssignError> {
        let mut current = Some(env);
        while let Some(handle) = current {
            let parent = match self.envs.get_mut(handle.0) {
                Some(slot) => {
                    if let Some(binding) = slot.payload.bindings.get_mut(&name) {
                        if binding.kind == BindingKind::Const {
                            return Err(AssignError::Const);
                        }
                        binding.value = value;
                        return Ok(());
                    }
                    slot.payload.parent
                }
                None => return Err(AssignError::NotFound),
            };
            current = parent;
        }
        Err(AssignError::NotFound)
    }

    // --- Collection -------------------------------------------------------

    pub fn should_collect(&self) -> bool {
        self.bytes_allocated > self.threshold
    }

    /// Runs one full mark-and-sweep cycle using the currently tracked
    /// roots (`current_env` plus `value_roots`).
    pub fn collect(&mut self) {
        log::debug!(
            "gc: collection starting, bytes_allocated={} threshold={}",
            self.bytes_allocated,
            self.threshold
        );

        self.strings.clear_marks();
        self.objects.clear_marks();
        self.arrays.clear_marks();
        self.envs.clear_marks();

        if let Some(env) = self.current_env {
            marker::mark_env(self, env);
        }
        let roots: Vec<Value> = self.value_roots.clone();
        for value in &roots {
            marker::mark_value(self, value);
        }

        let (strings_freed, strings_bytes) = self.strings.sweep();
        let (objects_freed, objects_bytes) = self.objects.sweep();
        let (arrays_freed, arrays_bytes) = self.arrays.sweep();
        let (envs_freed, envs_bytes) = self.envs.sweep();

        let freed = strings_freed + objects_freed + arrays_freed + envs_freed;
        let bytes = strings_bytes + objects_bytes + arrays_bytes + envs_bytes;

        self.bytes_allocated = self.bytes_allocated.saturating_sub(bytes as usize);
        self.threshold = (2 * self.bytes_allocated).max(self.config.initial_threshold);

        self.stats.collections_run += 1;
        self.stats.objects_freed += freed;
        self.stats.bytes_freed += bytes;

        log::debug!(
            "gc: collection finished, freed {freed} objects ({bytes} bytes), new threshold={}",
            self.threshold
        );
    }
}
