//! Property tests for option resolution and derivation.

use proptest::prelude::*;

use scythe_recipe_lib::consts::{OPT_FPIC, OPT_OPENGL, OPT_SHARED};
use scythe_recipe_lib::derive::derive_dependencies;
use scythe_recipe_lib::options::{RawOptions, ResolveError, resolve};
use scythe_recipe_lib::platform::{Arch, CppStd, Os, Platform};
use scythe_recipe_lib::profile::Profile;

fn any_os() -> impl Strategy<Value = Os> {
  prop_oneof![Just(Os::Linux), Just(Os::MacOs), Just(Os::Windows)]
}

fn any_arch() -> impl Strategy<Value = Arch> {
  prop_oneof![Just(Arch::X86_64), Just(Arch::Aarch64)]
}

fn any_cppstd() -> impl Strategy<Value = CppStd> {
  let levels: Vec<CppStd> = CppStd::known_levels().collect();
  (prop::sample::select(levels), any::<bool>())
    .prop_map(|(std, gnu)| if gnu { std.with_gnu_extensions() } else { std })
}

fn any_profile() -> impl Strategy<Value = Profile> {
  prop_oneof![Just(Profile::V1), Just(Profile::V2)]
}

/// Overrides limited to the options `profile` declares
fn raw_for(profile: Profile) -> impl Strategy<Value = RawOptions> {
  let opengl = if profile == Profile::V1 {
    proptest::option::of(any::<bool>()).boxed()
  } else {
    Just(None).boxed()
  };
  (proptest::option::of(any::<bool>()), proptest::option::of(any::<bool>()), opengl).prop_map(
    |(shared, fpic, opengl)| {
      let mut raw = RawOptions::new();
      if let Some(v) = shared {
        raw.set(OPT_SHARED, v);
      }
      if let Some(v) = fpic {
        raw.set(OPT_FPIC, v);
      }
      if let Some(v) = opengl {
        raw.set(OPT_OPENGL, v);
      }
      raw
    },
  )
}

fn profile_and_raw() -> impl Strategy<Value = (Profile, RawOptions)> {
  any_profile().prop_flat_map(|profile| (Just(profile), raw_for(profile)))
}

proptest! {
  #[test]
  fn fpic_presence_follows_os((profile, raw) in profile_and_raw(), os in any_os(), arch in any_arch()) {
    let recipe = profile.recipe().unwrap();
    let options = resolve(&recipe, &raw, &Platform::new(arch, os)).unwrap();

    if os == Os::Windows {
      prop_assert!(!options.contains(OPT_FPIC));
    } else {
      let explicit = raw.iter().find(|(name, _)| *name == OPT_FPIC).map(|(_, v)| v);
      prop_assert_eq!(options.get(OPT_FPIC), Some(explicit.unwrap_or(true)));
    }
  }

  #[test]
  fn resolution_is_deterministic((profile, raw) in profile_and_raw(), os in any_os(), arch in any_arch()) {
    let recipe = profile.recipe().unwrap();
    let platform = Platform::new(arch, os);

    let first = resolve(&recipe, &raw, &platform).unwrap();
    let second = resolve(&recipe, &raw, &platform).unwrap();
    prop_assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
    prop_assert_eq!(first, second);
  }

  #[test]
  fn standard_validation_ignores_options(
    (profile, raw) in profile_and_raw(),
    os in any_os(),
    cppstd in any_cppstd(),
  ) {
    let recipe = profile.recipe().unwrap();
    let platform = Platform::new(Arch::X86_64, os).with_cppstd(cppstd);
    let result = resolve(&recipe, &raw, &platform);

    if cppstd.year() < CppStd::CPP17.year() {
      let is_validation_error = matches!(result, Err(ResolveError::Validation { .. }));
      prop_assert!(is_validation_error);
    } else {
      prop_assert!(result.is_ok());
    }
  }

  #[test]
  fn v1_loader_and_define_follow_opengl((profile, raw) in profile_and_raw(), os in any_os()) {
    prop_assume!(profile == Profile::V1);
    let recipe = profile.recipe().unwrap();
    let options = resolve(&recipe, &raw, &Platform::new(Arch::X86_64, os)).unwrap();
    let derivation = derive_dependencies(&options, &recipe);

    if options.is_enabled(OPT_OPENGL) {
      prop_assert_eq!(derivation.count_of("glad"), 1);
      prop_assert!(derivation.defines.contains("SCYTHE_USE_OPENGL"));
    } else {
      prop_assert_eq!(derivation.count_of("glad"), 0);
      prop_assert!(derivation.defines.is_empty());
    }
  }

  #[test]
  fn v2_never_derives_defines(raw in raw_for(Profile::V2), os in any_os()) {
    let recipe = Profile::V2.recipe().unwrap();
    let options = resolve(&recipe, &raw, &Platform::new(Arch::X86_64, os)).unwrap();
    let derivation = derive_dependencies(&options, &recipe);

    prop_assert!(derivation.defines.is_empty());
    prop_assert_eq!(derivation.requires.len(), 1);
    prop_assert_eq!(derivation.requires[0].name(), "gtest");
  }

  #[test]
  fn derivation_is_stable_across_runs((profile, raw) in profile_and_raw(), os in any_os()) {
    let platform = Platform::new(Arch::X86_64, os);
    let first = {
      let recipe = profile.recipe().unwrap();
      derive_dependencies(&resolve(&recipe, &raw, &platform).unwrap(), &recipe)
    };
    let second = {
      let recipe = profile.recipe().unwrap();
      derive_dependencies(&resolve(&recipe, &raw, &platform).unwrap(), &recipe)
    };
    prop_assert_eq!(first, second);
  }
}
