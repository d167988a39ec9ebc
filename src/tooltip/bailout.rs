/// A human-readable explanation of a JIT bailout kind, looked up as
/// `Bailout_{bailout_type}`. Kinds without an explanation return `None`.
pub fn bailout_description(bailout_type: &str) -> Option<&'static str> {
    let description = match format!("Bailout_{bailout_type}").as_str() {
        "Bailout_Inevitable" => {
            "An inevitable bailout, such as reaching code that was never compiled."
        }
        "Bailout_DuringVMCall" => "The bailout happened during a call into the VM.",
        "Bailout_TooManyArguments" => "The call had too many arguments.",
        "Bailout_DynamicNameNotFound" => "A dynamic scope lookup found no binding.",
        "Bailout_StringArgumentsEval" => "An eval call involved the arguments object.",
        "Bailout_Overflow" => "Integer arithmetic overflowed.",
        "Bailout_Round" => "Math.round produced a value which isn't an int32.",
        "Bailout_NonPrimitiveInput" => {
            "A non-primitive value was passed where a primitive was expected."
        }
        "Bailout_PrecisionLoss" => "Converting a double to an int32 lost precision.",
        "Bailout_TypeBarrierO" => "An object failed a type barrier.",
        "Bailout_TypeBarrierV" => "A value failed a type barrier.",
        "Bailout_MonitorTypes" => "A value failed a type check in a monitored operation.",
        "Bailout_Hole" => "An array hole was read.",
        "Bailout_NegativeIndex" => "An array was accessed with a negative index.",
        "Bailout_NonInt32Input" => "A value which isn't an int32 was unboxed as one.",
        "Bailout_NonNumericInput" => "A value which isn't a number was unboxed as one.",
        "Bailout_NonBooleanInput" => "A value which isn't a boolean was unboxed as one.",
        "Bailout_NonObjectInput" => "A value which isn't an object was unboxed as one.",
        "Bailout_NonStringInput" => "A value which isn't a string was unboxed as one.",
        "Bailout_NonSymbolInput" => "A value which isn't a symbol was unboxed as one.",
        "Bailout_NonBigIntInput" => "A value which isn't a BigInt was unboxed as one.",
        "Bailout_Double" => "A double value was produced where an integer was expected.",
        "Bailout_ArgumentCheck" => "An argument failed a type check at function entry.",
        "Bailout_BoundsCheck" => "An array access was out of bounds.",
        "Bailout_Detached" => "A typed array's buffer was detached.",
        "Bailout_ShapeGuard" => "An object didn't have the expected shape.",
        "Bailout_UninitializedLexical" => "A lexical binding was accessed before initialization.",
        "Bailout_IonExceptionDebugMode" => "An exception was thrown while the debugger was active.",
        "Bailout_FirstExecution" => "Code was run for the first time, with no type information.",
        "Bailout_OverflowInvalidate" => {
            "Integer arithmetic overflowed, invalidating the compiled script."
        }
        "Bailout_CastObject" => "An object failed a class check.",
        _ => return None,
    };
    Some(description)
}
