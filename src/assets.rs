//! Embedded static assets.

/// Bootstrap script served at the `/script.js` route.
///
/// Defines the minimal `global.Runtime` shim the generated loader expects.
/// The blob is fixed at compile time and identical across all requests and
/// processes; bump it together with `CLIENT_VERSION` when the runtime
/// contract changes.
pub const BOOTSTRAP_SCRIPT: &str = r#"// wasmdev bootstrap v1
(() => {
  if (typeof window !== "undefined") {
    window.global = window;
  } else if (typeof self !== "undefined") {
    self.global = self;
  } else {
    throw new Error("cannot bootstrap: neither window nor self is defined");
  }
  const decoder = new TextDecoder("utf-8");
  global.Runtime = class {
    constructor() {
      this.exited = false;
      this.importObject = {
        env: {
          write: (ptr, len) => {
            const mem = new Uint8Array(this.instance.exports.memory.buffer, ptr, len);
            console.log(decoder.decode(mem));
          },
          exit: (code) => {
            this.exited = true;
            if (code !== 0) console.warn("exit code:", code);
          },
          now_ms: () => performance.now(),
          random: (ptr, len) => {
            const mem = new Uint8Array(this.instance.exports.memory.buffer, ptr, len);
            crypto.getRandomValues(mem);
          },
        },
      };
    }
    run(instance) {
      this.instance = instance;
      if (typeof instance.exports.run === "function") {
        instance.exports.run();
      } else if (typeof instance.exports._start === "function") {
        instance.exports._start();
      }
    }
  };
})();
"#;
