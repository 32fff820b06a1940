//! Shared log fixtures for the integration corpus

pub const XCODE_SUCCESS: &str = "=== BUILD TARGET MyApp ===\nCompiling MyApp ViewController.swift\nCompiling MyApp AppDelegate.swift\n** BUILD SUCCEEDED **";

pub const XCODE_FAILURE: &str = "=== BUILD TARGET MyApp ===\n/path/to/File.swift:42:10: error: cannot find type 'Foo' in scope\n** BUILD FAILED **";

pub const XCODE_DURATION: &str = "Build completed in 10.5 seconds\n** BUILD SUCCEEDED **";

pub const XCODE_MIXED: &str = "Build settings from command line:\n=== BUILD TARGET MyApp ===\n/Users/dev/MyApp/ViewController.swift:25:9: warning: variable 'unused' was never used\nCompileSwift normal arm64 /Users/dev/MyApp/AppDelegate.swift (in target 'MyApp' from project 'MyApp')\n/Users/dev/MyApp/Model.swift:10:1: note: did you mean 'model'?\nLd /Users/dev/build/MyApp.app/MyApp normal\n** BUILD SUCCEEDED **";

pub const SWIFT_SUCCESS: &str = "Building for debugging...\nCompiling App Sources/App/main.swift\nLinking ./.build/debug/App\nBuild complete! (4.2s)";

pub const SWIFT_FAILURE_MIXED: &str = "Building for debugging...\nCompiling MyLib Sources/MyLib/Parser.swift\nCompiling MyLib Sources/MyLib/Lexer.swift\n/Users/dev/MyLib/Sources/MyLib/Parser.swift:88:15: error: cannot convert value of type 'Int' to expected type 'String'\n/Users/dev/MyLib/Sources/MyLib/Lexer.swift:12:5: warning: initialization of 'token' was never used\nerror: compile command failed\nBuild complete! (8.7s)";

pub const SPM_TREE: &str = "Dependencies:\n└─ MyPackage\n   ├─ swift-algorithms@1.0.0\n   ├─ swift-nio@2.0.0\n   └─ logging";

pub const SPM_RESOLVE: &str = "Fetching https://github.com/apple/swift-nio.git\nCloning https://github.com/apple/swift-nio.git\nResolving https://github.com/apple/swift-nio.git at 2.62.0";

pub const SPM_RESOLVE_FAILURE: &str = "Fetching https://github.com/apple/swift-nio.git\nerror: failed to resolve dependencies";

pub const SPM_DUMP_JSON: &str = r#"{
  "name": "DemoKit",
  "products": [
    {"name": "DemoKit", "type": {"library": ["automatic"]}}
  ],
  "dependencies": [
    {
      "sourceControl": [
        {
          "identity": "swift-algorithms",
          "location": {"remote": [{"urlString": "https://github.com/apple/swift-algorithms.git"}]},
          "requirement": {"range": [{"lowerBound": "1.0.0", "upperBound": "2.0.0"}]}
        }
      ]
    }
  ]
}"#;
